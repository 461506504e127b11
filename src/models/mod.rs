//! Model layer
//!
//! Rust types for the entities served by the CMNS-SDN management API.
//!
//! Structure:
//! - `ipam.rs` - sections, subnets, addresses
//! - `topology.rs` - sites and devices
//! - `payload.rs` - tagged union placed inside tree nodes
//! - `node_type.rs` - node kinds and keys
//! - `tree_kind.rs` - IPAM or topology view

mod ids;
pub mod ipam;
pub mod node_type;
pub mod payload;
pub mod topology;
pub mod tree_kind;

pub use ipam::{Address, Section, Subnet};
pub use node_type::{NodeKey, NodeType};
pub use payload::NodePayload;
pub use topology::{Device, Site};
pub use tree_kind::TreeKind;
