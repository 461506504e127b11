//! Fetch error taxonomy

use crate::models::NodeType;
use thiserror::Error;

/// Failure of a remote collection fetch
///
/// An empty result is never an error; this type only describes requests that
/// could not produce a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("{0} nodes have no children to fetch")]
    UnsupportedParent(NodeType),

    #[error("inventory error: {0}")]
    Inventory(String),
}

impl FetchError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
