//! Errors raised at the terminal boundary

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Reading user input or writing to the terminal failed.
    #[error("terminal: cannot {action}")]
    Terminal {
        action: String,
        #[source]
        source: io::Error,
    },

    /// The interactive selector could not run.
    #[error("selection failed: {0}")]
    Selection(String),
}

impl InfraError {
    pub fn terminal(action: impl Into<String>, source: io::Error) -> Self {
        Self::Terminal {
            action: action.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
