//! Tree node representation

use crate::models::{NodeKey, NodePayload, NodeType};

/// The unit of display in a navigation tree
///
/// `children` only holds children that are already resolved, in domain order.
/// `has_unknown_children` is set while the child set still has to be fetched,
/// which is not the same as having zero children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub payload: NodePayload,
    /// Logical parent used to reconstruct hierarchy, never ownership
    pub parent_id: Option<String>,
    pub children: Vec<TreeNode>,
    pub has_unknown_children: bool,
}

impl TreeNode {
    /// Node with an already-known (possibly empty) child set
    pub fn resolved(payload: NodePayload, parent_id: Option<String>) -> Self {
        Self {
            payload,
            parent_id,
            children: Vec::new(),
            has_unknown_children: false,
        }
    }

    /// Node whose children are unknown when its type is lazy
    pub fn from_payload(payload: NodePayload, parent_id: Option<String>) -> Self {
        let has_unknown_children = payload.node_type().is_lazy();
        Self {
            payload,
            parent_id,
            children: Vec::new(),
            has_unknown_children,
        }
    }

    pub fn id(&self) -> &str {
        self.payload.id()
    }

    pub fn node_type(&self) -> NodeType {
        self.payload.node_type()
    }

    pub fn key(&self) -> NodeKey {
        self.payload.key()
    }

    pub fn label(&self) -> String {
        self.payload.label()
    }

    pub fn is_key(&self, key: &NodeKey) -> bool {
        self.node_type() == key.node_type && self.id() == key.id
    }
}

/// Depth-first search over statically built nodes
pub fn find_node<'a>(nodes: &'a [TreeNode], key: &NodeKey) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.is_key(key) {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, key) {
            return Some(found);
        }
    }
    None
}
