//! Application state and main TUI logic

use super::state::{AsyncOperationState, LoadState, TreeView, UIState};
use crate::config::Config;
use crate::models::{NodeKey, TreeKind};
use crate::tree::{RowView, TreeAction, TreeNode};
use crate::tui::Theme;
use tokio::sync::mpsc;

/// Main application state
pub struct App {
    // Core data
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    /// Data source name shown in the header
    pub(crate) source: String,

    // Organized state
    pub(crate) active: TreeKind,
    pub(crate) ipam: TreeView,
    pub(crate) topology: TreeView,
    pub(crate) ui_state: UIState,
    pub(crate) async_state: AsyncOperationState,

    // Selection callbacks report here
    pub(crate) selected_rx: mpsc::UnboundedReceiver<(TreeKind, NodeKey)>,
}

impl App {
    pub fn new(config: Config, theme: Theme, source: impl Into<String>) -> Self {
        let (selected_tx, selected_rx) = mpsc::unbounded_channel();
        let active = config.ui.default_view;

        let mut async_state = AsyncOperationState::default();
        async_state.roots_pending.insert(active);

        Self {
            theme,
            source: source.into(),
            active,
            ipam: TreeView::new(TreeKind::Ipam, selected_tx.clone()),
            topology: TreeView::new(TreeKind::Topology, selected_tx),
            ui_state: UIState {
                page_size: 10,
                ..Default::default()
            },
            async_state,
            selected_rx,
            config,
        }
    }

    /// Reveal and select `key` once its tree has loaded
    pub fn set_focus(&mut self, key: Option<NodeKey>) {
        if let Some(key) = &key {
            let kind = TreeKind::of(key.node_type);
            if kind != self.active {
                self.active = kind;
                self.async_state.roots_pending.insert(kind);
            }
        }
        self.async_state.pending_focus = key;
    }

    pub fn active_kind(&self) -> TreeKind {
        self.active
    }

    pub fn view(&self, kind: TreeKind) -> &TreeView {
        match kind {
            TreeKind::Ipam => &self.ipam,
            TreeKind::Topology => &self.topology,
        }
    }

    pub fn view_mut(&mut self, kind: TreeKind) -> &mut TreeView {
        match kind {
            TreeKind::Ipam => &mut self.ipam,
            TreeKind::Topology => &mut self.topology,
        }
    }

    pub fn active_view(&self) -> &TreeView {
        self.view(self.active)
    }

    pub fn active_view_mut(&mut self) -> &mut TreeView {
        self.view_mut(self.active)
    }

    /// Switch tabs, loading the other tree on first visit
    pub fn set_view(&mut self, kind: TreeKind) {
        self.active = kind;
        self.ui_state.filter_mode = false;
        if self.view(kind).load_state == LoadState::Idle {
            self.async_state.roots_pending.insert(kind);
        }
    }

    /// Rows currently visible in the active view
    pub fn visible_rows(&self) -> Vec<RowView> {
        let view = self.active_view();
        view.store.filtered_rows(&view.filter)
    }

    /// Key of the row under the cursor
    pub fn cursor_key(&self) -> Option<NodeKey> {
        let rows = self.visible_rows();
        rows.get(self.active_view().cursor).map(|row| row.key.clone())
    }

    pub fn cursor(&self) -> usize {
        self.active_view().cursor
    }

    /// Keep the cursor inside the visible rows
    pub(crate) fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        let view = self.active_view_mut();
        view.cursor = view.cursor.min(len.saturating_sub(1));
    }

    /// Dispatch to the active view's store and queue any fetches it asks for
    pub fn dispatch(&mut self, action: TreeAction) {
        let kind = self.active;
        self.dispatch_to(kind, action);
    }

    pub(crate) fn dispatch_to(&mut self, kind: TreeKind, action: TreeAction) {
        let view = self.view_mut(kind);
        let effects = view.store.dispatch(action);
        view.pending_fetches.extend(effects);
        if kind == self.active {
            self.clamp_cursor();
        }
    }

    /// Install freshly loaded roots for a view
    ///
    /// A view that already had roots keeps its expansion and fetched
    /// children through a rebuild.
    pub fn set_roots(&mut self, kind: TreeKind, roots: Vec<TreeNode>) {
        tracing::debug!("Loaded {} roots for {} view", roots.len(), kind);
        self.view_mut(kind).load_state = LoadState::Ready;
        self.dispatch_to(kind, TreeAction::Rebuild(roots));
        self.apply_pending_focus(kind);
    }

    pub fn set_roots_error(&mut self, kind: TreeKind, message: String) {
        tracing::warn!("Failed to load {} view: {}", kind, message);
        self.view_mut(kind).load_state = LoadState::Failed(message.clone());
        self.set_status_message((format!("Failed to load {}: {}", kind.title(), message), true));
    }

    fn apply_pending_focus(&mut self, kind: TreeKind) {
        let Some(key) = self.async_state.pending_focus.clone() else {
            return;
        };
        if TreeKind::of(key.node_type) != kind {
            return;
        }
        self.async_state.pending_focus = None;

        let reveal = self.config.tree.reveal_focus;
        let view = self.view_mut(kind);
        if view.store.find_node(&key).is_none() {
            self.set_status_message((format!("{} not found", key), true));
            return;
        }
        if reveal {
            if let Some(effects) = view.store.reveal(&key) {
                view.pending_fetches.extend(effects);
            }
        }
        self.dispatch_to(kind, TreeAction::Select(key.clone()));
        self.move_cursor_to(&key);
    }

    /// Put the cursor on `key` if it is visible
    pub fn move_cursor_to(&mut self, key: &NodeKey) {
        if let Some(index) = self.visible_rows().iter().position(|row| &row.key == key) {
            self.active_view_mut().cursor = index;
        }
    }

    /// Detail pane subject: the selected node, else the node under the cursor
    pub fn detail_node(&self) -> Option<&TreeNode> {
        let store = &self.active_view().store;
        let key = store
            .selection()
            .selected()
            .cloned()
            .or_else(|| self.cursor_key())?;
        store.find_node(&key)
    }

    pub fn set_status_message(&mut self, message: (String, bool)) {
        self.ui_state.status_message = Some(message);
        self.ui_state.status_message_time = Some(std::time::Instant::now());
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.ui_state.status_message.as_ref()
    }

    pub(crate) fn check_status_message_timeout(&mut self) {
        use crate::tui::constants::STATUS_MESSAGE_TIMEOUT_SECS;
        if let Some(set_at) = self.ui_state.status_message_time {
            if set_at.elapsed() >= std::time::Duration::from_secs(STATUS_MESSAGE_TIMEOUT_SECS) {
                self.ui_state.status_message = None;
                self.ui_state.status_message_time = None;
            }
        }
    }

    pub fn is_filter_mode(&self) -> bool {
        self.ui_state.filter_mode
    }

    pub fn is_help_shown(&self) -> bool {
        self.ui_state.show_help
    }

    /// Report selections made through the store callbacks
    pub fn drain_selection_events(&mut self) {
        while let Ok((kind, key)) = self.selected_rx.try_recv() {
            let label = self
                .view(kind)
                .store
                .find_node(&key)
                .map(TreeNode::label)
                .unwrap_or_else(|| key.id.clone());
            self.set_status_message((format!("Selected {} {}", key.node_type, label), false));
        }
    }

    /// Tear down both stores; later fetch results are discarded
    pub fn shutdown(&mut self) {
        for kind in TreeKind::all() {
            let view = self.view_mut(*kind);
            view.store.dispatch(TreeAction::Teardown);
            view.pending_fetches.clear();
            view.fetch_rx.close();
        }
        self.async_state.roots_pending.clear();
        self.async_state.roots_rx.clear();
    }
}
