//! Attaching the failing path to filesystem errors

use std::error::Error;
use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// `OperationFailed` naming what was attempted on which path.
pub fn path_failure(
    action: &str,
    path: &Path,
    source: impl Into<Box<dyn Error + Send + Sync>>,
) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: format!("{action}: {}", path.display()),
        source: source.into(),
    }
}

pub trait IoResultExt<T> {
    /// e.g. `fs.write(&path, "").with_path_context("create file", &path)?`
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| path_failure(action, path, e))
    }
}
