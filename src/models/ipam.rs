//! IPAM entities: sections, subnets and addresses

use super::ids;
use serde::{Deserialize, Serialize};

/// A section groups subnets and may nest under another section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent section id; `None` for root sections
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub master_section: Option<String>,
}

impl Section {
    /// Parent section id, with the API's `"0"` placeholder read as no parent
    pub fn parent_id(&self) -> Option<&str> {
        match self.master_section.as_deref() {
            None | Some("") | Some("0") => None,
            Some(parent) => Some(parent),
        }
    }
}

/// An IP subnet owned by a section, optionally nested under another subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    /// Network address, e.g. `10.0.0.0`
    pub subnet: String,
    /// Prefix length
    pub mask: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "ids::id")]
    pub section_id: String,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub master_subnet_id: Option<String>,
}

impl Subnet {
    /// Top-level subnets hang directly off their section.
    /// The API encodes "no parent" as null, empty or `"0"`.
    pub fn is_top_level(&self) -> bool {
        match self.master_subnet_id.as_deref() {
            None | Some("") | Some("0") => true,
            Some(_) => false,
        }
    }

    /// CIDR notation, e.g. `10.0.0.0/24`
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.subnet, self.mask)
    }
}

/// A single IP address allocation inside a subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "ids::id")]
    pub subnet_id: String,
}
