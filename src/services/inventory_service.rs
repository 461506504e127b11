//! Inventory service
//!
//! Loads the flat entity lists a tree starts from and builds the static
//! roots. Keeps the TUI and the headless command free of data-source
//! details: both only see built trees and a `CollectionFetcher` for the
//! lazy parts.

use crate::api::{CollectionFetcher, FileInventory, HttpApi, InventorySource};
use crate::config::Config;
use crate::models::TreeKind;
use crate::tree::{TreeNode, build_ipam_tree, build_topology_tree};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Service for loading inventory trees
#[derive(Clone)]
pub struct InventoryService {
    source: Arc<dyn InventorySource>,
    fetcher: Arc<dyn CollectionFetcher>,
}

impl InventoryService {
    /// Wrap a data source that can both list and fetch children
    pub fn new<S>(source: Arc<S>) -> Self
    where
        S: InventorySource + CollectionFetcher + 'static,
    {
        Self {
            source: source.clone(),
            fetcher: source,
        }
    }

    /// Build from an inventory file when given, otherwise from the API config
    pub fn from_config(config: &Config, fixture: Option<&Path>) -> Result<Self> {
        match fixture {
            Some(path) => {
                let inventory = FileInventory::load(path)?;
                tracing::info!("Using inventory file {}", inventory.path().display());
                Ok(Self::new(Arc::new(inventory)))
            }
            None => {
                let api = HttpApi::from_config(&config.api)?;
                tracing::info!("Using management API at {}", api.base_url());
                Ok(Self::new(Arc::new(api)))
            }
        }
    }

    pub fn fetcher(&self) -> Arc<dyn CollectionFetcher> {
        Arc::clone(&self.fetcher)
    }

    /// Name of the underlying data source ("http", "file")
    pub fn source_type(&self) -> &str {
        self.fetcher.fetcher_type()
    }

    /// Sections with their nested sections and top-level subnets
    pub async fn load_ipam(&self) -> Result<Vec<TreeNode>> {
        let (sections, subnets) =
            futures::try_join!(self.source.list_sections(), self.source.list_subnets())
                .context("Failed to load IPAM sections and subnets")?;
        tracing::debug!(
            "Building IPAM tree from {} sections and {} subnets",
            sections.len(),
            subnets.len()
        );
        Ok(build_ipam_tree(None, &sections, &subnets))
    }

    /// Sites, each lazily expanding to its devices
    pub async fn load_topology(&self) -> Result<Vec<TreeNode>> {
        let sites = self
            .source
            .list_sites()
            .await
            .context("Failed to load topology sites")?;
        tracing::debug!("Building topology tree from {} sites", sites.len());
        Ok(build_topology_tree(&sites, &[]))
    }

    pub async fn load(&self, kind: TreeKind) -> Result<Vec<TreeNode>> {
        match kind {
            TreeKind::Ipam => self.load_ipam().await,
            TreeKind::Topology => self.load_topology().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Inventory;
    use crate::models::{NodeType, Section, Site, Subnet};

    fn inventory() -> Inventory {
        Inventory {
            sections: vec![Section {
                id: "1".to_string(),
                name: "Core".to_string(),
                description: None,
                master_section: None,
            }],
            subnets: vec![Subnet {
                id: "10".to_string(),
                subnet: "10.0.0.0".to_string(),
                mask: 8,
                description: None,
                section_id: "1".to_string(),
                master_subnet_id: None,
            }],
            sites: vec![Site {
                id: "5".to_string(),
                name: "Lab".to_string(),
                location: None,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_both_trees() {
        let service = InventoryService::new(Arc::new(FileInventory::from_inventory(inventory())));
        assert_eq!(service.source_type(), "file");

        let ipam = service.load(TreeKind::Ipam).await.unwrap();
        assert_eq!(ipam.len(), 1);
        assert_eq!(ipam[0].children[0].node_type(), NodeType::Subnet);

        let topology = service.load(TreeKind::Topology).await.unwrap();
        assert_eq!(topology.len(), 1);
        assert!(topology[0].has_unknown_children);
    }
}
