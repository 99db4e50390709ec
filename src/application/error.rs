//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("invalid template '{name}': {message}")]
    InvalidTemplate { name: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// True for errors caused by invalid input rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(_) | ApplicationError::InvalidTemplate { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
