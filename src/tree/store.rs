//! Tree store
//!
//! Owns everything one tree view needs (built roots, expansion, child cache,
//! selection) and funnels every mutation through [`TreeStore::dispatch`].
//! Dispatch never performs I/O: when a fetch is needed it hands back a
//! [`TreeEffect::Fetch`] for the caller to run, and the result comes back in
//! as [`TreeAction::FetchCompleted`].

use super::builder::ancestor_path;
use super::cache::{CacheStatus, ChildCache, FetchTicket};
use super::expansion::ExpansionState;
use super::filter::filter_rows;
use super::node::{TreeNode, find_node};
use super::render::{RowView, render};
use super::selection::{SelectCallback, SelectionController, SelectionState};
use crate::api::{CollectionFetcher, FetchError};
use crate::models::{NodeKey, NodePayload};
use std::collections::VecDeque;

/// Every state change a tree view can go through
#[derive(Debug)]
pub enum TreeAction {
    /// Flip the disclosure control of a node
    Toggle(NodeKey),
    Expand(NodeKey),
    Collapse(NodeKey),
    /// Reveal a node by expanding its ancestor chain
    ExpandPath(Vec<NodeKey>),
    CollapseAll,
    Select(NodeKey),
    ClearSelection,
    /// External refresh signal for one node
    Invalidate(NodeKey),
    InvalidateAll,
    /// Caller-supplied flat lists changed; expansion and cache are kept
    Rebuild(Vec<TreeNode>),
    FetchCompleted {
        ticket: FetchTicket,
        result: Result<Vec<NodePayload>, FetchError>,
    },
    /// Hosting view is going away
    Teardown,
}

impl TreeAction {
    fn name(&self) -> &'static str {
        match self {
            TreeAction::Toggle(_) => "toggle",
            TreeAction::Expand(_) => "expand",
            TreeAction::Collapse(_) => "collapse",
            TreeAction::ExpandPath(_) => "expand_path",
            TreeAction::CollapseAll => "collapse_all",
            TreeAction::Select(_) => "select",
            TreeAction::ClearSelection => "clear_selection",
            TreeAction::Invalidate(_) => "invalidate",
            TreeAction::InvalidateAll => "invalidate_all",
            TreeAction::Rebuild(_) => "rebuild",
            TreeAction::FetchCompleted { .. } => "fetch_completed",
            TreeAction::Teardown => "teardown",
        }
    }
}

/// Work the caller has to carry out after a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEffect {
    Fetch(FetchTicket),
}

/// Read-only view of the UI state, for restoring a view on re-render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub expanded: Vec<NodeKey>,
    pub selected: Option<NodeKey>,
}

#[derive(Debug)]
pub struct TreeStore {
    roots: Vec<TreeNode>,
    expansion: ExpansionState,
    cache: ChildCache,
    selection: SelectionController,
    mounted: bool,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TreeStore {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self {
            roots,
            expansion: ExpansionState::new(),
            cache: ChildCache::new(),
            selection: SelectionController::new(),
            mounted: true,
        }
    }

    pub fn with_callback(roots: Vec<TreeNode>, on_select: SelectCallback) -> Self {
        let mut store = Self::new(roots);
        store.selection.set_callback(on_select);
        store
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn cache(&self) -> &ChildCache {
        &self.cache
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn status(&self, key: &NodeKey) -> &CacheStatus {
        self.cache.status(key)
    }

    /// Apply an action and return the fetches it requires
    pub fn dispatch(&mut self, action: TreeAction) -> Vec<TreeEffect> {
        if !self.mounted {
            tracing::debug!("Ignoring {} after teardown", action.name());
            return Vec::new();
        }

        match action {
            TreeAction::Toggle(key) => {
                if self.expansion.toggle(&key) {
                    self.fetch_if_needed(&key).into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            TreeAction::Expand(key) => {
                self.expansion.expand(&key);
                self.fetch_if_needed(&key).into_iter().collect()
            }
            TreeAction::Collapse(key) => {
                self.expansion.collapse(&key);
                Vec::new()
            }
            TreeAction::ExpandPath(keys) => {
                self.expansion.expand_path(&keys);
                keys.iter()
                    .filter_map(|key| self.fetch_if_needed(key))
                    .collect()
            }
            TreeAction::CollapseAll => {
                self.expansion.collapse_all();
                Vec::new()
            }
            TreeAction::Select(key) => {
                self.selection.select(&key);
                Vec::new()
            }
            TreeAction::ClearSelection => {
                self.selection.clear();
                Vec::new()
            }
            TreeAction::Invalidate(key) => {
                self.cache.invalidate(&key);
                if self.expansion.is_expanded(&key) {
                    self.fetch_if_needed(&key).into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            TreeAction::InvalidateAll => {
                self.cache.invalidate_all();
                self.fetch_unfetched_expanded()
            }
            TreeAction::Rebuild(roots) => {
                tracing::debug!("Rebuilding tree with {} roots", roots.len());
                self.roots = roots;
                self.fetch_unfetched_expanded()
            }
            TreeAction::FetchCompleted { ticket, result } => {
                let parent = ticket.key().clone();
                if self.cache.complete_fetch(ticket, result) {
                    self.fetch_expanded_children(&parent)
                } else {
                    Vec::new()
                }
            }
            TreeAction::Teardown => {
                tracing::debug!("Tearing down tree view");
                self.cache.teardown();
                self.mounted = false;
                Vec::new()
            }
        }
    }

    /// Start a fetch when `key` is a lazy node whose children are still unknown
    fn fetch_if_needed(&mut self, key: &NodeKey) -> Option<TreeEffect> {
        if !key.node_type.is_lazy() {
            return None;
        }
        let unresolved = self.find_node(key)?.has_unknown_children;
        if !unresolved {
            return None;
        }
        self.cache.begin_fetch(key).map(TreeEffect::Fetch)
    }

    /// Expanded nodes that never had a fetch (used after rebuilds and refreshes)
    ///
    /// Failed entries are left alone: retries are user-initiated.
    fn fetch_unfetched_expanded(&mut self) -> Vec<TreeEffect> {
        self.expansion
            .expanded_keys()
            .iter()
            .filter(|key| matches!(self.cache.status(key), CacheStatus::NotFetched))
            .cloned()
            .collect::<Vec<_>>()
            .iter()
            .filter_map(|key| self.fetch_if_needed(key))
            .collect()
    }

    /// Freshly loaded children that were already expanded need their own fetch
    fn fetch_expanded_children(&mut self, parent: &NodeKey) -> Vec<TreeEffect> {
        let pending: Vec<NodeKey> = self
            .cache
            .children(parent)
            .iter()
            .filter(|child| child.has_unknown_children)
            .map(TreeNode::key)
            .filter(|key| self.expansion.is_expanded(key))
            .collect();
        pending
            .iter()
            .filter_map(|key| self.cache.begin_fetch(key).map(TreeEffect::Fetch))
            .collect()
    }

    /// Look a node up in the built tree, then among fetched children
    pub fn find_node(&self, key: &NodeKey) -> Option<&TreeNode> {
        find_node(&self.roots, key).or_else(|| self.cache.find(key))
    }

    /// Ancestor chain of a node, following fetched parents back to the built tree
    pub fn path_to(&self, key: &NodeKey) -> Option<Vec<NodeKey>> {
        if let Some(path) = ancestor_path(&self.roots, key) {
            return Some(path);
        }

        let mut upward = Vec::new();
        let mut current = key.clone();
        for _ in 0..=self.cache.len() {
            let parent = self.cache.parent_of(&current)?.clone();
            upward.push(parent.clone());
            if let Some(mut path) = ancestor_path(&self.roots, &parent) {
                upward.reverse();
                path.extend(upward);
                return Some(path);
            }
            current = parent;
        }
        None
    }

    /// Expand every ancestor of `key` so that it becomes visible
    pub fn reveal(&mut self, key: &NodeKey) -> Option<Vec<TreeEffect>> {
        let path = self.path_to(key)?;
        Some(self.dispatch(TreeAction::ExpandPath(path)))
    }

    pub fn rows(&self) -> Vec<RowView> {
        render(&self.roots, &self.expansion, &self.cache)
    }

    pub fn filtered_rows(&self, query: &str) -> Vec<RowView> {
        filter_rows(&self.rows(), query)
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            expanded: self.expansion.expanded_keys(),
            selected: self.selection.state().selected().cloned(),
        }
    }

    /// Restore a snapshot taken from another store instance
    pub fn restore(&mut self, snapshot: TreeSnapshot) -> Vec<TreeEffect> {
        self.expansion.restore(snapshot.expanded);
        match snapshot.selected {
            Some(key) => self.selection.select(&key),
            None => self.selection.clear(),
        }
        self.fetch_unfetched_expanded()
    }

    /// Fetch the children of `key` now, unless loaded or already loading
    pub async fn ensure_children<F>(&mut self, fetcher: &F, key: &NodeKey)
    where
        F: CollectionFetcher + ?Sized,
    {
        if !self.mounted {
            return;
        }
        self.cache.ensure_children(fetcher, key).await;
    }

    /// Run fetch effects to completion, including the ones they cascade into
    ///
    /// Fetches of one round run concurrently and are applied in whatever
    /// order they finish.
    pub async fn settle<F>(&mut self, fetcher: &F, effects: Vec<TreeEffect>)
    where
        F: CollectionFetcher + ?Sized,
    {
        let mut pending: VecDeque<TreeEffect> = effects.into();
        while !pending.is_empty() {
            let round = pending.drain(..).map(|effect| async move {
                match effect {
                    TreeEffect::Fetch(ticket) => {
                        let key = ticket.key().clone();
                        let result = fetcher.list_children(key.node_type, &key.id).await;
                        (ticket, result)
                    }
                }
            });
            let outcomes = futures::future::join_all(round.collect::<Vec<_>>()).await;
            for (ticket, result) in outcomes {
                pending.extend(self.dispatch(TreeAction::FetchCompleted { ticket, result }));
            }
        }
    }
}
