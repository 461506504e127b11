//! Remote collection fetcher traits

use super::error::FetchError;
use crate::models::{NodePayload, NodeType, Section, Site, Subnet};
use async_trait::async_trait;

/// Lists the children of a parent node on demand
#[async_trait]
pub trait CollectionFetcher: Send + Sync {
    /// Fetch every child of `(parent_type, parent_id)`, in domain order
    async fn list_children(
        &self,
        parent_type: NodeType,
        parent_id: &str,
    ) -> Result<Vec<NodePayload>, FetchError>;

    /// Get fetcher type name
    fn fetcher_type(&self) -> &str;
}

/// Supplies the flat lists a tree is initially built from
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn list_sections(&self) -> Result<Vec<Section>, FetchError>;

    async fn list_subnets(&self) -> Result<Vec<Subnet>, FetchError>;

    async fn list_sites(&self) -> Result<Vec<Site>, FetchError>;
}
