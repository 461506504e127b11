//! Tree renderer
//!
//! Walks the statically built tree depth-first and grafts fetched children
//! from the cache by key lookup, emitting one row per visible node. Order is
//! exactly the order of the built tree and the fetch results; nothing is
//! re-sorted here.

use super::cache::{CacheStatus, ChildCache};
use super::expansion::ExpansionState;
use super::node::TreeNode;
use crate::models::{NodeKey, NodeType};
use std::collections::HashSet;

static RESOLVED: CacheStatus = CacheStatus::Loaded;

/// Disclosure state shown in front of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    /// No children, known for sure
    Leaf,
    Collapsed,
    Expanded,
    /// Expanded, children are being fetched
    Loading,
    /// Expanded, but no fetch has been started yet
    Unfetched,
    /// Last fetch failed; toggling again retries
    Failed(String),
}

impl RowState {
    /// Glyph for the disclosure control
    pub fn marker(&self) -> &'static str {
        match self {
            RowState::Leaf => " ",
            RowState::Collapsed => "▸",
            RowState::Expanded => "▾",
            RowState::Loading => "⟳",
            RowState::Unfetched => "?",
            RowState::Failed(_) => "!",
        }
    }

    pub fn ascii_marker(&self) -> &'static str {
        match self {
            RowState::Leaf => " ",
            RowState::Collapsed => "+",
            RowState::Expanded => "-",
            RowState::Loading => "~",
            RowState::Unfetched => "?",
            RowState::Failed(_) => "!",
        }
    }
}

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: NodeKey,
    pub label: String,
    pub depth: usize,
    pub state: RowState,
    /// Last child of its parent
    pub is_last: bool,
    /// For each ancestor level, whether a vertical guide continues below
    pub guides: Vec<bool>,
}

impl RowView {
    pub fn node_type(&self) -> NodeType {
        self.key.node_type
    }

    /// Tree-drawing prefix such as `│  ├─ `
    pub fn prefix(&self, ascii: bool) -> String {
        let (pipe, tee, elbow) = if ascii {
            ("|  ", "|- ", "`- ")
        } else {
            ("│  ", "├─ ", "└─ ")
        };

        let mut out = String::new();
        if self.depth == 0 {
            return out;
        }
        for &continues in &self.guides[1..] {
            out.push_str(if continues { pipe } else { "   " });
        }
        out.push_str(if self.is_last { elbow } else { tee });
        out
    }
}

/// Emit the visible rows of `tree`
pub fn render(tree: &[TreeNode], expansion: &ExpansionState, cache: &ChildCache) -> Vec<RowView> {
    let nodes: Vec<&TreeNode> = tree.iter().collect();
    let mut walk = Walk {
        expansion,
        cache,
        guides: Vec::new(),
        ancestors: HashSet::new(),
        rows: Vec::new(),
    };
    walk.level(&nodes, 0);
    walk.rows
}

/// Children of `node` as currently known: static ones, then cached ones
fn resolved_children<'a>(node: &'a TreeNode, cache: &'a ChildCache) -> Vec<&'a TreeNode> {
    let mut children: Vec<&TreeNode> = node.children.iter().collect();
    if node.has_unknown_children {
        children.extend(cache.children(&node.key()));
    }
    children
}

/// Depth-first walk state
///
/// `ancestors` holds the keys on the current path; a fetched child that is
/// already on it would loop forever and is left out.
struct Walk<'a> {
    expansion: &'a ExpansionState,
    cache: &'a ChildCache,
    guides: Vec<bool>,
    ancestors: HashSet<NodeKey>,
    rows: Vec<RowView>,
}

impl<'a> Walk<'a> {
    fn level(&mut self, nodes: &[&'a TreeNode], depth: usize) {
        let nodes: Vec<&'a TreeNode> = nodes
            .iter()
            .copied()
            .filter(|node| {
                let looped = self.ancestors.contains(&node.key());
                if looped {
                    tracing::debug!("Skipping {}: already an ancestor of itself", node.key());
                }
                !looped
            })
            .collect();

        for (i, &node) in nodes.iter().enumerate() {
            let key = node.key();
            let is_last = i + 1 == nodes.len();
            let expanded = self.expansion.is_expanded(&key);
            let status = if node.has_unknown_children {
                self.cache.status(&key)
            } else {
                &RESOLVED
            };
            let children = match status {
                CacheStatus::Loaded => resolved_children(node, self.cache),
                _ => Vec::new(),
            };

            let state = match (status, expanded) {
                (CacheStatus::Failed(err), _) => RowState::Failed(err.to_string()),
                (CacheStatus::Loaded, _) if children.is_empty() => RowState::Leaf,
                (CacheStatus::Loaded, true) => RowState::Expanded,
                (_, false) => RowState::Collapsed,
                (CacheStatus::Loading, true) => RowState::Loading,
                (CacheStatus::NotFetched, true) => RowState::Unfetched,
            };

            self.rows.push(RowView {
                key: key.clone(),
                label: node.label(),
                depth,
                state: state.clone(),
                is_last,
                guides: self.guides.clone(),
            });

            if state == RowState::Expanded {
                self.guides.push(!is_last);
                self.ancestors.insert(key.clone());
                self.level(&children, depth + 1);
                self.ancestors.remove(&key);
                self.guides.pop();
            }
        }
    }
}

/// Plain-text dump of rows, one per line
pub fn format_rows(rows: &[RowView], ascii: bool) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = if ascii {
            row.state.ascii_marker()
        } else {
            row.state.marker()
        };
        out.push_str(&row.prefix(ascii));
        out.push_str(marker);
        out.push(' ');
        out.push_str(&row.label);
        if let RowState::Failed(message) = &row.state {
            out.push_str("  [");
            out.push_str(message);
            out.push(']');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(depth: usize, is_last: bool, guides: Vec<bool>) -> RowView {
        RowView {
            key: NodeKey::new(NodeType::Section, "1"),
            label: "x".to_string(),
            depth,
            state: RowState::Leaf,
            is_last,
            guides,
        }
    }

    #[test]
    fn test_prefix_root_is_empty() {
        assert_eq!(row(0, true, vec![]).prefix(true), "");
    }

    #[test]
    fn test_prefix_nested() {
        assert_eq!(row(1, false, vec![true]).prefix(true), "|- ");
        assert_eq!(row(2, true, vec![false, true]).prefix(true), "|  `- ");
        assert_eq!(row(2, true, vec![false, false]).prefix(false), "   └─ ");
    }
}
