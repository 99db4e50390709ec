//! Tree builder turning slash-separated path entries into a template node tree.

use std::collections::BTreeMap;
use std::path::MAIN_SEPARATOR;

use crate::domain::entities::{Node, NodeKind};

/// Intermediate node keyed by `(kind, name)`.
///
/// The key order (directories first, then name) is the output order.
#[derive(Debug, Default)]
struct DraftNode {
    children: BTreeMap<(NodeKind, String), DraftNode>,
}

impl DraftNode {
    fn into_nodes(self) -> Vec<Node> {
        self.children
            .into_iter()
            .map(|((kind, name), draft)| Node {
                name,
                kind,
                children: match kind {
                    NodeKind::Directory => draft.into_nodes(),
                    NodeKind::File => Vec::new(),
                },
            })
            .collect()
    }
}

/// Constructs template trees from path entries.
///
/// Entries sharing a `(name, kind)` key under the same parent are merged, so a
/// file and a directory with the same name can coexist.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: DraftNode,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sorted tree from raw entries in one batch.
    ///
    /// `"docs/"` yields an empty directory `docs`, `"docs/readme.md"` yields
    /// directory `docs` containing file `readme.md`.
    pub fn build<S: AsRef<str>>(paths: &[S]) -> Vec<Node> {
        let mut builder = Self::new();
        for path in paths {
            builder.add_path(path.as_ref());
        }
        builder.finish()
    }

    /// Add one raw user entry. Returns `false` if the entry was blank and discarded.
    pub fn add_path(&mut self, raw: &str) -> bool {
        let entry = raw.trim();
        if entry.is_empty() {
            return false;
        }
        let normalized = if MAIN_SEPARATOR == '/' {
            entry.to_string()
        } else {
            entry.replace(MAIN_SEPARATOR, "/")
        };
        let is_dir_input = normalized.ends_with('/');
        let stripped = normalized.strip_suffix('/').unwrap_or(&normalized);
        let parts: Vec<&str> = stripped.split('/').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            return false;
        }
        let last_kind = if is_dir_input {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        self.insert(&parts, last_kind);
        true
    }

    /// Insert a path given as components; all but the last are directories.
    pub fn insert<S: AsRef<str>>(&mut self, parts: &[S], last_kind: NodeKind) {
        let Some((last, ancestors)) = parts.split_last() else {
            return;
        };
        let mut current = &mut self.root;
        for part in ancestors {
            current = current
                .children
                .entry((NodeKind::Directory, part.as_ref().to_string()))
                .or_default();
        }
        current
            .children
            .entry((last_kind, last.as_ref().to_string()))
            .or_default();
    }

    /// Finish building: directories before files, then by name, at every level.
    pub fn finish(self) -> Vec<Node> {
        self.root.into_nodes()
    }
}
