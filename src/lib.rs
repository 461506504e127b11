//! cmns-tree library
//!
//! Lazy-loading navigation trees over the CMNS-SDN IPAM and topology
//! inventory. The tree core (`tree`) is UI-agnostic; the terminal viewer
//! (`tui`) sits behind the `tui` feature.

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod tree;
#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use api::{CollectionFetcher, FetchError, FileInventory, HttpApi, InventorySource};
pub use models::{NodeKey, NodePayload, NodeType, TreeKind};
pub use tree::{TreeAction, TreeEffect, TreeNode, TreeSnapshot, TreeStore};
