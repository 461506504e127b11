//! Expansion state store
//!
//! Tracks which nodes are expanded, independently of the data they hold.
//! Keys are stable across tree rebuilds, so a rebuild never collapses an
//! expanded subtree.

use crate::models::NodeKey;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<NodeKey>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `key`; returns whether the node is now expanded
    pub fn toggle(&mut self, key: &NodeKey) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        }
    }

    pub fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expanded.contains(key)
    }

    /// Expand a whole ancestor chain in one update
    pub fn expand_path(&mut self, keys: &[NodeKey]) {
        self.expanded.extend(keys.iter().cloned());
    }

    pub fn expand(&mut self, key: &NodeKey) {
        self.expanded.insert(key.clone());
    }

    pub fn collapse(&mut self, key: &NodeKey) {
        self.expanded.remove(key);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Sorted snapshot of expanded keys
    pub fn expanded_keys(&self) -> Vec<NodeKey> {
        let mut keys: Vec<NodeKey> = self.expanded.iter().cloned().collect();
        keys.sort();
        keys
    }

    pub fn restore(&mut self, keys: impl IntoIterator<Item = NodeKey>) {
        self.expanded = keys.into_iter().collect();
    }
}
