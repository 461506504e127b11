//! File-backed inventory
//!
//! Serves a full inventory snapshot from a local YAML or JSON file. Used for
//! offline browsing, demos and tests.

use super::error::FetchError;
use super::fetcher::{CollectionFetcher, InventorySource};
use crate::models::{Address, Device, NodePayload, NodeType, Section, Site, Subnet};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete inventory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Inventory {
    /// Children of a lazy parent, in file order
    pub fn children_of(&self, parent_type: NodeType, parent_id: &str) -> Vec<NodePayload> {
        match parent_type {
            NodeType::Subnet => self
                .subnets
                .iter()
                .filter(|s| !s.is_top_level() && s.master_subnet_id.as_deref() == Some(parent_id))
                .cloned()
                .map(NodePayload::Subnet)
                .chain(
                    self.addresses
                        .iter()
                        .filter(|a| a.subnet_id == parent_id)
                        .cloned()
                        .map(NodePayload::Address),
                )
                .collect(),
            NodeType::Site => self
                .devices
                .iter()
                .filter(|d| d.site_id == parent_id)
                .cloned()
                .map(NodePayload::Device)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// File data source
pub struct FileInventory {
    path: PathBuf,
    inventory: Inventory,
}

impl FileInventory {
    /// Load an inventory file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read inventory file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let inventory: Inventory = if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse inventory file: {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse inventory file: {}", path.display()))?
        };

        tracing::debug!(
            "Loaded inventory from {}: {} sections, {} subnets, {} addresses, {} sites, {} devices",
            path.display(),
            inventory.sections.len(),
            inventory.subnets.len(),
            inventory.addresses.len(),
            inventory.sites.len(),
            inventory.devices.len()
        );

        Ok(Self { path, inventory })
    }

    pub fn from_inventory(inventory: Inventory) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            inventory,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CollectionFetcher for FileInventory {
    async fn list_children(
        &self,
        parent_type: NodeType,
        parent_id: &str,
    ) -> Result<Vec<NodePayload>, FetchError> {
        if !parent_type.is_lazy() {
            return Err(FetchError::UnsupportedParent(parent_type));
        }
        let known = match parent_type {
            NodeType::Subnet => self.inventory.subnets.iter().any(|s| s.id == parent_id),
            _ => self.inventory.sites.iter().any(|s| s.id == parent_id),
        };
        if !known {
            return Err(FetchError::Inventory(format!(
                "{} {} not found in {}",
                parent_type,
                parent_id,
                self.path.display()
            )));
        }
        Ok(self.inventory.children_of(parent_type, parent_id))
    }

    fn fetcher_type(&self) -> &str {
        "file"
    }
}

#[async_trait]
impl InventorySource for FileInventory {
    async fn list_sections(&self) -> Result<Vec<Section>, FetchError> {
        Ok(self.inventory.sections.clone())
    }

    async fn list_subnets(&self) -> Result<Vec<Subnet>, FetchError> {
        Ok(self.inventory.subnets.clone())
    }

    async fn list_sites(&self) -> Result<Vec<Site>, FetchError> {
        Ok(self.inventory.sites.clone())
    }
}
