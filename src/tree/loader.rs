//! Background child loading
//!
//! Runs fetch effects on the tokio runtime and reports the results back over
//! a channel, so an event loop can keep drawing while requests are in flight.

use super::cache::FetchTicket;
use super::store::{TreeAction, TreeEffect};
use crate::api::{CollectionFetcher, FetchError};
use crate::models::NodePayload;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of one background fetch
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<NodePayload>, FetchError>,
}

impl From<FetchOutcome> for TreeAction {
    fn from(outcome: FetchOutcome) -> Self {
        TreeAction::FetchCompleted {
            ticket: outcome.ticket,
            result: outcome.result,
        }
    }
}

/// Fetch the children named by `ticket` in a background task
///
/// If the receiver is gone (view closed) the outcome is dropped.
pub fn spawn_fetch(
    fetcher: Arc<dyn CollectionFetcher>,
    ticket: FetchTicket,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let key = ticket.key().clone();
        let result = fetcher.list_children(key.node_type, &key.id).await;
        if tx.send(FetchOutcome { ticket, result }).is_err() {
            tracing::debug!("Dropping children of {}: receiver closed", key);
        }
    })
}

/// Spawn every fetch in `effects`
pub fn spawn_effects(
    fetcher: &Arc<dyn CollectionFetcher>,
    effects: Vec<TreeEffect>,
    tx: &mpsc::UnboundedSender<FetchOutcome>,
) {
    for effect in effects {
        match effect {
            TreeEffect::Fetch(ticket) => {
                spawn_fetch(Arc::clone(fetcher), ticket, tx.clone());
            }
        }
    }
}
