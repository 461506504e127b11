//! Application state structures
//!
//! State sub-structures that organize the App's fields into logical
//! groupings: one `TreeView` per tab, UI chrome, and pending async work.

use crate::models::{NodeKey, TreeKind};
use crate::tree::{FetchOutcome, TreeEffect, TreeNode, TreeStore};
use std::collections::{HashMap, HashSet};
use tokio::sync::{mpsc, oneshot};

/// Loading state of a view's static roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// One navigation tree tab
pub struct TreeView {
    pub kind: TreeKind,
    pub store: TreeStore,
    pub load_state: LoadState,
    /// Index into the visible (filtered) rows
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Text filter for the rows
    pub filter: String,
    /// Fetches requested by the store but not spawned yet
    pub pending_fetches: Vec<TreeEffect>,
    pub fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    pub fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl TreeView {
    pub fn new(kind: TreeKind, selected_tx: mpsc::UnboundedSender<(TreeKind, NodeKey)>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let store = TreeStore::with_callback(
            Vec::new(),
            Box::new(move |id, node_type| {
                let _ = selected_tx.send((kind, NodeKey::new(node_type, id)));
            }),
        );
        Self {
            kind,
            store,
            load_state: LoadState::Idle,
            cursor: 0,
            scroll_offset: 0,
            filter: String::new(),
            pending_fetches: Vec::new(),
            fetch_tx,
            fetch_rx,
        }
    }
}

/// UI-related state (filter mode, help, status messages)
#[derive(Debug, Default)]
pub struct UIState {
    /// Whether filter mode is active (user is typing)
    pub filter_mode: bool,
    /// Whether to show help overlay
    pub show_help: bool,
    /// Status message to display (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// When status message was set (for auto-clearing)
    pub status_message_time: Option<std::time::Instant>,
    /// Render tick, drives the loading spinner
    pub tick: usize,
    /// Cached page size for PageUp/PageDown (updated each render)
    pub page_size: usize,
}

/// Async operation state (root loads and their result channels)
#[derive(Debug, Default)]
pub struct AsyncOperationState {
    /// Views whose roots should be (re)loaded
    pub roots_pending: HashSet<TreeKind>,
    pub roots_rx: HashMap<TreeKind, oneshot::Receiver<anyhow::Result<Vec<TreeNode>>>>,
    /// Node to reveal once its tree is loaded
    pub pending_focus: Option<NodeKey>,
}
