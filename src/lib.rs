//! Tree Generator: capture directory layouts as reusable templates and
//! re-create them with `{variable}` substitution.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
