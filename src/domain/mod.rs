//! Domain layer: template model and pure tree algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod render;

pub use builder::TreeBuilder;
pub use entities::*;
pub use error::DomainError;
pub use render::{render, EMPTY_TREE};
