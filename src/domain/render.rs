//! Connector-drawn text rendering of template trees.

use crate::domain::entities::{Node, NodeKind};

/// Placeholder shown for a tree without entries.
pub const EMPTY_TREE: &str = "(empty)";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Render `nodes` as a tree diagram, one line per node, every line prefixed with `prefix`.
///
/// An empty sequence renders as the single line [`EMPTY_TREE`].
pub fn render(nodes: &[Node], prefix: &str) -> String {
    if nodes.is_empty() {
        return format!("{EMPTY_TREE}\n");
    }
    let mut out = String::new();
    render_into(&mut out, nodes, prefix);
    out
}

fn render_into(out: &mut String, nodes: &[Node], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let (connector, continuation) = if is_last {
            (LAST_BRANCH, SPACE)
        } else {
            (BRANCH, PIPE)
        };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&node.name);
        out.push('\n');

        match node.kind {
            NodeKind::Directory => {
                let child_prefix = format!("{prefix}{continuation}");
                render_into(out, &node.children, &child_prefix);
            }
            NodeKind::File => {}
        }
    }
}
