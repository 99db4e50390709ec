//! Template materializer
//!
//! Creates the directories and empty files of a template tree on disk,
//! substituting `{variable}` placeholders in every name.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{substitute, DomainError, Node, NodeKind, Template};
use crate::infrastructure::traits::FileSystem;

/// One filesystem entry to create, with its substituted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub path: PathBuf,
    pub kind: NodeKind,
}

/// Outcome of a completed materialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories: usize,
    pub files: usize,
}

/// Resolve a tree into the entries to create, in depth-first pre-order.
///
/// Pure: fails with a validation error before anything touches the disk if a
/// declared variable has no binding or a substituted name would escape its parent.
pub fn plan(
    root: &[Node],
    variables: &[String],
    bindings: &BTreeMap<String, String>,
    target: &Path,
) -> Result<Vec<PlannedEntry>, DomainError> {
    if let Some(missing) = variables.iter().find(|v| !bindings.contains_key(*v)) {
        return Err(DomainError::MissingVariable(missing.clone()));
    }
    let mut entries = Vec::new();
    plan_nodes(root, bindings, target, &mut entries)?;
    Ok(entries)
}

fn plan_nodes(
    nodes: &[Node],
    bindings: &BTreeMap<String, String>,
    base: &Path,
    entries: &mut Vec<PlannedEntry>,
) -> Result<(), DomainError> {
    for node in nodes {
        let name = substitute(&node.name, bindings);
        let relative = Path::new(&name);
        let is_safe = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_safe {
            return Err(DomainError::UnsafeNodeName {
                raw: node.name.clone(),
                name,
            });
        }

        let path = base.join(relative);
        entries.push(PlannedEntry {
            path: path.clone(),
            kind: node.kind,
        });
        match node.kind {
            NodeKind::Directory => plan_nodes(&node.children, bindings, &path, entries)?,
            NodeKind::File => {}
        }
    }
    Ok(())
}

/// Writes template trees to a filesystem.
pub struct Materializer {
    fs: Arc<dyn FileSystem>,
}

impl Materializer {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Materialize `template` under `target`.
    pub fn apply(
        &self,
        template: &Template,
        bindings: &BTreeMap<String, String>,
        target: &Path,
    ) -> ApplicationResult<MaterializeReport> {
        self.apply_nodes(&template.root, &template.variables, bindings, target)
    }

    /// Materialize a bare tree under `target`.
    ///
    /// Not transactional: an I/O failure leaves everything created so far in place.
    #[instrument(skip(self, root, bindings))]
    pub fn apply_nodes(
        &self,
        root: &[Node],
        variables: &[String],
        bindings: &BTreeMap<String, String>,
        target: &Path,
    ) -> ApplicationResult<MaterializeReport> {
        let entries = plan(root, variables, bindings, target)?;

        self.fs
            .create_dir_all(target)
            .with_path_context("create target directory", target)?;

        let mut report = MaterializeReport::default();
        for entry in &entries {
            match entry.kind {
                NodeKind::Directory => {
                    self.fs
                        .create_dir_all(&entry.path)
                        .with_path_context("create directory", &entry.path)?;
                    report.directories += 1;
                }
                NodeKind::File => {
                    self.fs
                        .ensure_parent(&entry.path)
                        .with_path_context("create parent directory", &entry.path)?;
                    self.fs
                        .write(&entry.path, "")
                        .with_path_context("create file", &entry.path)?;
                    report.files += 1;
                }
            }
        }

        debug!(
            "apply: {} directories, {} files under {}",
            report.directories,
            report.files,
            target.display()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plan_is_pre_order() {
        let root = vec![
            Node::dir("a", vec![Node::file("x"), Node::dir("b", vec![Node::file("y")])]),
            Node::file("z"),
        ];
        let entries = plan(&root, &[], &BTreeMap::new(), Path::new("/t")).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/t/a"),
                PathBuf::from("/t/a/x"),
                PathBuf::from("/t/a/b"),
                PathBuf::from("/t/a/b/y"),
                PathBuf::from("/t/z"),
            ]
        );
    }

    #[test]
    fn test_plan_rejects_parent_traversal() {
        let root = vec![Node::dir("{name}", vec![])];
        let err = plan(
            &root,
            &["name".to_string()],
            &bindings(&[("name", "..")]),
            Path::new("/t"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::UnsafeNodeName { .. }));
    }

    #[test]
    fn test_plan_rejects_empty_substitution() {
        let root = vec![Node::file("{name}")];
        let err = plan(
            &root,
            &["name".to_string()],
            &bindings(&[("name", "")]),
            Path::new("/t"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::UnsafeNodeName { .. }));
    }

    #[test]
    fn test_plan_allows_nested_segments() {
        let root = vec![Node::file("{pkg}.rs")];
        let entries = plan(
            &root,
            &["pkg".to_string()],
            &bindings(&[("pkg", "core/lib")]),
            Path::new("/t"),
        )
        .unwrap();
        assert_eq!(entries[0].path, PathBuf::from("/t/core/lib.rs"));
    }
}
