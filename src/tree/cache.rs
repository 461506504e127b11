//! Lazy child cache
//!
//! Per-node cache of fetched children. Each entry moves monotonically
//! `NotFetched -> Loading -> Loaded | Failed`; only an explicit invalidation
//! (or a retry after `Failed`) starts it over.
//!
//! The fetch itself is split in two halves so the event loop never blocks:
//! [`ChildCache::begin_fetch`] hands out a [`FetchTicket`] and
//! [`ChildCache::complete_fetch`] applies the result later. A ticket is only
//! honoured while its generation still matches the entry, which discards
//! results for entries invalidated mid-flight and anything arriving after
//! [`ChildCache::teardown`].

use super::node::TreeNode;
use crate::api::{CollectionFetcher, FetchError};
use crate::models::{NodeKey, NodePayload};
use std::collections::HashMap;

static NOT_FETCHED: CacheStatus = CacheStatus::NotFetched;

/// Fetch status of one parent node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    NotFetched,
    Loading,
    Loaded,
    Failed(FetchError),
}

impl CacheStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, CacheStatus::Loaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CacheStatus::Loading)
    }
}

/// Proof that a fetch was started for `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: NodeKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct CacheEntry {
    status: CacheStatus,
    children: Vec<TreeNode>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ChildCache {
    entries: HashMap<NodeKey, CacheEntry>,
    next_generation: u64,
    torn_down: bool,
}

impl ChildCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, key: &NodeKey) -> &CacheStatus {
        self.entries
            .get(key)
            .map(|entry| &entry.status)
            .unwrap_or(&NOT_FETCHED)
    }

    /// Resolved children; empty unless the entry is `Loaded`
    pub fn children(&self, key: &NodeKey) -> &[TreeNode] {
        match self.entries.get(key) {
            Some(entry) if entry.status.is_loaded() => &entry.children,
            _ => &[],
        }
    }

    /// Mark `key` as loading and return a ticket for the single fetch to issue
    ///
    /// Returns `None` when the entry is already `Loading` or `Loaded`, or the
    /// cache has been torn down. `Failed` counts as `NotFetched`.
    pub fn begin_fetch(&mut self, key: &NodeKey) -> Option<FetchTicket> {
        if self.torn_down {
            return None;
        }
        if let Some(entry) = self.entries.get(key) {
            if matches!(entry.status, CacheStatus::Loading | CacheStatus::Loaded) {
                return None;
            }
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.entries.insert(
            key.clone(),
            CacheEntry {
                status: CacheStatus::Loading,
                children: Vec::new(),
                generation,
            },
        );
        tracing::debug!("Fetching children of {} (generation {})", key, generation);

        Some(FetchTicket {
            key: key.clone(),
            generation,
        })
    }

    /// Apply a fetch result; returns false when the result was discarded
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<NodePayload>, FetchError>,
    ) -> bool {
        if self.torn_down {
            tracing::debug!("Discarding children of {}: view closed", ticket.key);
            return false;
        }

        let entry = match self.entries.get_mut(&ticket.key) {
            Some(entry) if entry.generation == ticket.generation && entry.status.is_loading() => {
                entry
            }
            _ => {
                tracing::debug!(
                    "Discarding stale children of {} (generation {})",
                    ticket.key,
                    ticket.generation
                );
                return false;
            }
        };

        match result {
            Ok(payloads) => {
                tracing::debug!("Loaded {} children of {}", payloads.len(), ticket.key);
                entry.children = payloads
                    .into_iter()
                    .filter(|payload| accept_child(&ticket.key, payload))
                    .map(|payload| TreeNode::from_payload(payload, Some(ticket.key.id.clone())))
                    .collect();
                entry.status = CacheStatus::Loaded;
            }
            Err(err) => {
                tracing::warn!("Failed to load children of {}: {}", ticket.key, err);
                entry.children.clear();
                entry.status = CacheStatus::Failed(err);
            }
        }
        true
    }

    /// Fetch the children of `key` unless they are loaded or already loading
    ///
    /// Failures are recorded, never retried automatically.
    pub async fn ensure_children<F>(&mut self, fetcher: &F, key: &NodeKey)
    where
        F: CollectionFetcher + ?Sized,
    {
        let Some(ticket) = self.begin_fetch(key) else {
            return;
        };
        let result = fetcher.list_children(key.node_type, &key.id).await;
        self.complete_fetch(ticket, result);
    }

    /// Forget an entry so the next expansion fetches it again
    pub fn invalidate(&mut self, key: &NodeKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Drop everything and refuse further updates
    pub fn teardown(&mut self) {
        self.entries.clear();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Find a fetched node anywhere in the cache
    pub fn find(&self, key: &NodeKey) -> Option<&TreeNode> {
        self.entries
            .values()
            .filter(|entry| entry.status.is_loaded())
            .flat_map(|entry| entry.children.iter())
            .find(|node| node.is_key(key))
    }

    /// Parent key of a fetched node
    pub fn parent_of(&self, key: &NodeKey) -> Option<&NodeKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.status.is_loaded())
            .find(|(_, entry)| entry.children.iter().any(|node| node.is_key(key)))
            .map(|(parent, _)| parent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Integrity check on a fetched child; only a node listing itself is dropped
fn accept_child(parent: &NodeKey, payload: &NodePayload) -> bool {
    if payload.key() == *parent {
        tracing::warn!("Dropping {} from its own children", parent);
        return false;
    }
    if let Some(declared) = payload.declared_parent_id() {
        if declared != parent.id {
            tracing::warn!(
                "{} was listed under {} but declares parent {}",
                payload.key(),
                parent,
                declared
            );
        }
    }
    true
}
