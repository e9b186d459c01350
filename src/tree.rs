//! Record-tree traversal.
//!
//! Hierarchical fields (navigation menus, footer link groups, nested
//! feature lists) arrive as records whose field map holds a list of child
//! records under some conventional key (`Items`, `MainMenu`, …). This
//! module flattens such a tree into an ordered visit list carrying depth,
//! the same shape the CLI display and the HTML renderers consume.
//!
//! ## Guarantees
//!
//! - Pre-order: a record is visited before its children.
//! - Source order: siblings keep the array order the CMS delivered —
//!   menu order is content, never sorted here.
//! - Depth: the root visits at depth 0, its children at 1, and so on.
//! - Termination: CMS content is untrusted, and a record list that loops
//!   back on itself would recurse forever. The walk keeps the set of
//!   record ids on the active path and refuses to descend into a repeat,
//!   treating that node as terminal and reporting the truncation.

use crate::document::Record;
use std::collections::HashSet;

/// One visited node: the record plus its depth under the walk root.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub record: &'a Record,
    pub depth: usize,
}

/// Result of walking a record tree.
#[derive(Debug, Default)]
pub struct Walk<'a> {
    /// Pre-order visit list.
    pub visits: Vec<Visit<'a>>,
    /// Ids whose child lists were truncated because the id already
    /// appeared on the active path.
    pub truncated: Vec<String>,
}

impl<'a> Walk<'a> {
    /// True when at least one branch was cut by the cycle guard.
    pub fn has_cycles(&self) -> bool {
        !self.truncated.is_empty()
    }
}

/// Walk `root` and its descendants reachable through `child_field`.
///
/// Always returns at least the root itself at depth 0; a record with no
/// `child_field` entry (or an empty list) is a leaf.
pub fn walk<'a>(root: &'a Record, child_field: &str) -> Walk<'a> {
    let mut out = Walk::default();
    let mut on_path = HashSet::new();
    visit(root, child_field, 0, &mut on_path, &mut out);
    out
}

fn visit<'a>(
    node: &'a Record,
    child_field: &str,
    depth: usize,
    on_path: &mut HashSet<&'a str>,
    out: &mut Walk<'a>,
) {
    out.visits.push(Visit {
        record: node,
        depth,
    });

    let Some(children) = node.children(child_field) else {
        return;
    };
    if children.is_empty() {
        return;
    }

    on_path.insert(node.id.as_str());
    for child in children {
        if on_path.contains(child.id.as_str()) {
            // Malformed content: this id is already an ancestor. Treat the
            // node as terminal rather than recursing forever.
            out.truncated.push(child.id.clone());
            out.visits.push(Visit {
                record: child,
                depth: depth + 1,
            });
            continue;
        }
        visit(child, child_field, depth + 1, on_path, out);
    }
    on_path.remove(node.id.as_str());
}
