//! Navigation tree core
//!
//! Structure:
//! - `node.rs` - tree node type
//! - `builder.rs` - builds the static part of a tree from flat lists
//! - `expansion.rs` - which nodes are expanded
//! - `cache.rs` - lazily fetched children per node
//! - `render.rs` - flattens tree, expansion and cache into visible rows
//! - `filter.rs` - narrows rows by label
//! - `selection.rs` - single selection with a callback
//! - `store.rs` - reducer tying the pieces together
//! - `loader.rs` - runs fetch effects in background tasks

pub mod builder;
pub mod cache;
pub mod expansion;
pub mod filter;
pub mod loader;
pub mod node;
pub mod render;
pub mod selection;
pub mod store;

pub use builder::{ancestor_path, build_ipam_tree, build_topology_tree};
pub use cache::{CacheStatus, ChildCache, FetchTicket};
pub use expansion::ExpansionState;
pub use filter::filter_rows;
pub use loader::{FetchOutcome, spawn_effects, spawn_fetch};
pub use node::{TreeNode, find_node};
pub use render::{RowState, RowView, format_rows, render};
pub use selection::{SelectCallback, SelectionController, SelectionState};
pub use store::{TreeAction, TreeEffect, TreeSnapshot, TreeStore};
