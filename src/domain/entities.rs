//! Domain entities: template, node tree and placeholder handling

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use itertools::Itertools;
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::builder::TreeBuilder;
use crate::domain::error::DomainError;

/// Kind of a template node.
///
/// Declaration order is significant: directories sort before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "dir")]
    Directory,
    #[serde(rename = "file")]
    File,
}

/// One filesystem entry of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Raw name, may contain `{variable}` placeholders
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Children, only ever non-empty for directories
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Node>,
}

impl Node {
    pub fn dir(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Number of nodes in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    fn validate(&self, parent: &Path) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::EmptyNodeName(parent.to_path_buf()));
        }
        let path = parent.join(&self.name);
        match self.kind {
            NodeKind::File if !self.children.is_empty() => {
                Err(DomainError::FileWithChildren(path))
            }
            NodeKind::File => Ok(()),
            NodeKind::Directory => self
                .children
                .iter()
                .try_for_each(|child| child.validate(&path)),
        }
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        names.push(&self.name);
        for child in &self.children {
            child.collect_names(names);
        }
    }
}

/// A named, persisted directory layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Placeholder identifiers, deduplicated and sorted
    #[serde(default, deserialize_with = "null_as_empty")]
    pub variables: Vec<String>,
    /// Top-level nodes
    #[serde(rename = "structure", default, deserialize_with = "null_as_empty")]
    pub root: Vec<Node>,
}

impl Template {
    /// Build a template from user-entered path entries.
    pub fn from_paths<S: AsRef<str>>(
        name: impl Into<String>,
        description: impl Into<String>,
        paths: &[S],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variables: extract_variables(paths.iter().map(AsRef::as_ref)),
            root: TreeBuilder::build(paths),
        }
    }

    /// Build a template around an already assembled tree, e.g. a scanned directory.
    pub fn from_structure(
        name: impl Into<String>,
        description: impl Into<String>,
        root: Vec<Node>,
    ) -> Self {
        let mut names = Vec::new();
        for node in &root {
            node.collect_names(&mut names);
        }
        Self {
            name: name.into(),
            description: description.into(),
            variables: extract_variables(names),
            root,
        }
    }

    /// Check the structural invariants of a template, e.g. after loading it from storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_template_name(&self.name)?;
        let base = PathBuf::new();
        self.root.iter().try_for_each(|node| node.validate(&base))
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.iter().map(Node::count).sum()
    }
}

/// Records written by older tools store empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Template names double as storage keys and must be usable as a single file name.
pub fn validate_template_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(DomainError::InvalidTemplateName(name.to_string()));
    }
    Ok(())
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("valid placeholder pattern"))
}

/// Collect the distinct `{identifier}` placeholders of the given names, sorted.
pub fn extract_variables<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let re = placeholder_regex();
    names
        .into_iter()
        .flat_map(|name| re.captures_iter(name).map(|caps| caps[1].to_string()))
        .unique()
        .sorted()
        .collect()
}

/// Replace every bound `{key}` token of `name` with its value.
///
/// Single pass: substituted text is never rescanned, unbound tokens stay literal.
pub fn substitute(name: &str, bindings: &BTreeMap<String, String>) -> String {
    placeholder_regex()
        .replace_all(name, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
