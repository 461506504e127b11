//! Selection controller
//!
//! Single-selection over heterogeneous node types. Selecting is the only
//! exit point from the tree core: it reports the chosen node upward through
//! the callback and never expands, collapses or fetches anything itself.

use crate::models::{NodeKey, NodeType};

/// Callback invoked with the id and type of the newly selected node
pub type SelectCallback = Box<dyn FnMut(&str, NodeType) + Send>;

/// Which node, if any, is selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<NodeKey>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<&NodeKey> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|k| k.id.as_str())
    }

    pub fn selected_type(&self) -> Option<NodeType> {
        self.selected.as_ref().map(|k| k.node_type)
    }

    pub fn is_selected(&self, key: &NodeKey) -> bool {
        self.selected.as_ref() == Some(key)
    }
}

#[derive(Default)]
pub struct SelectionController {
    state: SelectionState,
    on_select: Option<SelectCallback>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(on_select: SelectCallback) -> Self {
        Self {
            state: SelectionState::default(),
            on_select: Some(on_select),
        }
    }

    pub fn set_callback(&mut self, on_select: SelectCallback) {
        self.on_select = Some(on_select);
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn select(&mut self, key: &NodeKey) {
        tracing::debug!("Selected {}", key);
        self.state.selected = Some(key.clone());
        if let Some(callback) = self.on_select.as_mut() {
            callback(&key.id, key.node_type);
        }
    }

    pub fn clear(&mut self) {
        self.state.selected = None;
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("state", &self.state)
            .field("has_callback", &self.on_select.is_some())
            .finish()
    }
}
