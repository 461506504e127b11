//! Remote collection fetchers
//!
//! Provides the collaborators the tree core pulls data from:
//! - CMNS-SDN REST API (`HttpApi`)
//! - Local inventory files (`FileInventory`, for offline use and testing)

mod error;
mod fetcher;
mod file;
mod http;

pub use error::FetchError;
pub use fetcher::{CollectionFetcher, InventorySource};
pub use file::{FileInventory, Inventory};
pub use http::{Credential, HttpApi};
