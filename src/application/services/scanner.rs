//! Directory scanner
//!
//! Reads an existing directory into the template node shape.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use crate::application::{path_failure, ApplicationResult};
use crate::domain::{Node, NodeKind, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Entries never captured into a template.
pub const IGNORED_NAMES: [&str; 2] = [".git", ".DS_Store"];

fn is_ignored(name: &OsStr) -> bool {
    IGNORED_NAMES.iter().any(|ignored| name == *ignored)
}

/// Scans live directories into template trees.
pub struct DirectoryScanner {
    fs: Arc<dyn FileSystem>,
}

impl DirectoryScanner {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Scan `path` into a sorted node tree.
    ///
    /// `current_depth` is the depth `path` itself sits at; `max_depth` of 0 means
    /// unlimited. Entries at depth `max_depth` are kept as leaves without children.
    /// Any unreadable directory aborts the whole scan.
    #[instrument(skip(self))]
    pub fn scan(
        &self,
        path: &Path,
        current_depth: usize,
        max_depth: usize,
    ) -> ApplicationResult<Vec<Node>> {
        if max_depth > 0 && current_depth >= max_depth {
            return Ok(Vec::new());
        }
        if !self.fs.is_dir(path) {
            let kind = if self.fs.exists(path) {
                io::ErrorKind::InvalidInput
            } else {
                io::ErrorKind::NotFound
            };
            return Err(path_failure(
                "read directory",
                path,
                io::Error::new(kind, "not a readable directory"),
            ));
        }

        let mut walker = WalkDir::new(path).min_depth(1);
        if max_depth > 0 {
            walker = walker.max_depth(max_depth - current_depth);
        }

        let mut builder = TreeBuilder::new();
        let mut count = 0usize;
        for entry in walker
            .into_iter()
            .filter_entry(|e: &DirEntry| !is_ignored(e.file_name()))
        {
            let entry = entry.map_err(|e| {
                let failed = e.path().unwrap_or(path).to_path_buf();
                path_failure("read directory", &failed, e)
            })?;
            let parts: Vec<String> = entry
                .path()
                .strip_prefix(path)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let kind = if entry.file_type().is_dir() {
                NodeKind::Directory
            } else {
                NodeKind::File
            };
            builder.insert(&parts, kind);
            count += 1;
        }

        debug!("scan: {} entries under {}", count, path.display());
        Ok(builder.finish())
    }
}
