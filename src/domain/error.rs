//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent violations of the template model.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("required variable '{0}' was not provided")]
    MissingVariable(String),

    #[error("invalid template name: '{0}'")]
    InvalidTemplateName(String),

    #[error("node name must not be empty (under {0})")]
    EmptyNodeName(PathBuf),

    #[error("file node cannot have children: {0}")]
    FileWithChildren(PathBuf),

    #[error("unsafe entry name after substitution: '{name}' (from '{raw}')")]
    UnsafeNodeName { raw: String, name: String },
}
