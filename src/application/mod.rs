//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod authoring;
pub mod error;
pub mod error_ext;
pub mod services;

pub use authoring::{run_wizard, AuthoringWizard, WizardState};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::{path_failure, IoResultExt};
