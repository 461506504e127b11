//! Async operation management
//!
//! The event loop asks the app for work (`trigger_*`), spawns it, and feeds
//! results back (`try_get_*` / `poll_*`). The app itself never spawns, so it
//! can be driven without a runtime in tests.

use super::core::App;
use super::state::LoadState;
use crate::models::TreeKind;
use crate::tree::{FetchOutcome, FetchTicket, TreeAction, TreeEffect, TreeNode};
use tokio::sync::{mpsc, oneshot};

/// Request to load the static roots of a view
pub struct RootsRequest {
    pub kind: TreeKind,
    /// Channel to send the built roots back
    pub tx: oneshot::Sender<anyhow::Result<Vec<TreeNode>>>,
}

/// Request to fetch the children named by a ticket
pub struct FetchRequest {
    pub kind: TreeKind,
    pub ticket: FetchTicket,
    /// Channel of the view that asked
    pub tx: mpsc::UnboundedSender<FetchOutcome>,
}

impl App {
    /// Take pending root loads
    pub fn trigger_roots_loads(&mut self) -> Vec<RootsRequest> {
        let kinds: Vec<TreeKind> = self.async_state.roots_pending.drain().collect();
        kinds
            .into_iter()
            .map(|kind| {
                let (tx, rx) = oneshot::channel();
                self.async_state.roots_rx.insert(kind, rx);
                let view = self.view_mut(kind);
                if view.load_state != LoadState::Ready {
                    view.load_state = LoadState::Loading;
                }
                RootsRequest { kind, tx }
            })
            .collect()
    }

    /// Collect finished root loads
    pub fn try_get_roots_results(&mut self) -> Vec<(TreeKind, anyhow::Result<Vec<TreeNode>>)> {
        let mut done = Vec::new();
        self.async_state.roots_rx.retain(|kind, rx| match rx.try_recv() {
            Ok(result) => {
                done.push((*kind, result));
                false
            }
            Err(oneshot::error::TryRecvError::Empty) => true,
            Err(oneshot::error::TryRecvError::Closed) => {
                done.push((*kind, Err(anyhow::anyhow!("Loading {} was cancelled", kind))));
                false
            }
        });
        done
    }

    /// Apply a finished root load
    pub fn apply_roots_result(&mut self, kind: TreeKind, result: anyhow::Result<Vec<TreeNode>>) {
        match result {
            Ok(roots) => self.set_roots(kind, roots),
            Err(e) => self.set_roots_error(kind, format!("{:#}", e)),
        }
    }

    /// Take the fetches queued by both views
    pub fn trigger_fetches(&mut self) -> Vec<FetchRequest> {
        let mut requests = Vec::new();
        for kind in TreeKind::all() {
            let view = self.view_mut(*kind);
            for effect in view.pending_fetches.drain(..) {
                match effect {
                    TreeEffect::Fetch(ticket) => requests.push(FetchRequest {
                        kind: *kind,
                        ticket,
                        tx: view.fetch_tx.clone(),
                    }),
                }
            }
        }
        requests
    }

    /// Feed finished fetches back into their stores; returns how many arrived
    pub fn poll_fetch_results(&mut self) -> usize {
        let mut applied = 0;
        for kind in TreeKind::all() {
            let mut outcomes = Vec::new();
            while let Ok(outcome) = self.view_mut(*kind).fetch_rx.try_recv() {
                outcomes.push(outcome);
            }
            for outcome in outcomes {
                applied += 1;
                if let Err(e) = &outcome.result {
                    let hint = if e.is_transient() { " (r to retry)" } else { "" };
                    self.set_status_message((
                        format!("Failed to load {}: {}{}", outcome.ticket.key(), e, hint),
                        true,
                    ));
                }
                self.dispatch_to(*kind, TreeAction::from(outcome));
            }
        }
        applied
    }
}
