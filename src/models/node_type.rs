//! Node type definitions
//!
//! Closed set of entity kinds that can appear in a navigation tree. The kind
//! decides the icon, the styling and whether children must be fetched lazily.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enumeration of all tree node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    // IPAM
    Section,
    Subnet,
    Address,
    // Topology
    Site,
    Device,
}

impl NodeType {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Section => "section",
            NodeType::Subnet => "subnet",
            NodeType::Address => "address",
            NodeType::Site => "site",
            NodeType::Device => "device",
        }
    }

    /// Try to parse a string into a NodeType, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all node types
    pub fn all() -> &'static [Self] {
        &[
            NodeType::Section,
            NodeType::Subnet,
            NodeType::Address,
            NodeType::Site,
            NodeType::Device,
        ]
    }

    /// Whether children of this kind are only known after an on-demand fetch
    pub fn is_lazy(&self) -> bool {
        matches!(self, NodeType::Subnet | NodeType::Site)
    }

    /// Unicode icon shown in front of the label
    pub fn icon(&self) -> &'static str {
        match self {
            NodeType::Section => "▣",
            NodeType::Subnet => "◇",
            NodeType::Address => "·",
            NodeType::Site => "⌂",
            NodeType::Device => "▪",
        }
    }

    /// ASCII fallback for terminals without Unicode support
    pub fn ascii_icon(&self) -> &'static str {
        match self {
            NodeType::Section => "S",
            NodeType::Subnet => "N",
            NodeType::Address => "A",
            NodeType::Site => "T",
            NodeType::Device => "D",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "section" | "sections" => Ok(NodeType::Section),
            "subnet" | "subnets" => Ok(NodeType::Subnet),
            "address" | "addresses" | "ip" => Ok(NodeType::Address),
            "site" | "sites" => Ok(NodeType::Site),
            "device" | "devices" => Ok(NodeType::Device),
            _ => Err(format!("Unknown node type: {}", s)),
        }
    }
}

/// Identity of a node: ids are only unique within their type namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub node_type: NodeType,
    pub id: String,
}

impl NodeKey {
    pub fn new(node_type: NodeType, id: impl Into<String>) -> Self {
        Self {
            node_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_type, self.id)
    }
}

impl FromStr for NodeKey {
    type Err = String;

    /// Parse the `type:id` form used on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected <type>:<id>, got '{}'", s))?;
        if id.is_empty() {
            return Err(format!("Missing id in '{}'", s));
        }
        Ok(NodeKey::new(kind.parse()?, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(NodeType::Section.as_str(), "section");
        assert_eq!(NodeType::Device.as_str(), "device");
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(NodeType::parse_optional("Subnet"), Some(NodeType::Subnet));
        assert_eq!(NodeType::parse_optional("sites"), Some(NodeType::Site));
        assert_eq!(NodeType::parse_optional("vlan"), None);
    }

    #[test]
    fn test_lazy_types() {
        let lazy: Vec<_> = NodeType::all().iter().filter(|t| t.is_lazy()).collect();
        assert_eq!(lazy, vec![&NodeType::Subnet, &NodeType::Site]);
    }

    #[test]
    fn test_node_key_round_trip_display() {
        let key: NodeKey = "subnet:42".parse().unwrap();
        assert_eq!(key, NodeKey::new(NodeType::Subnet, "42"));
        assert_eq!(key.to_string(), "subnet:42");
    }

    #[test]
    fn test_node_key_rejects_malformed() {
        assert!("subnet".parse::<NodeKey>().is_err());
        assert!("subnet:".parse::<NodeKey>().is_err());
        assert!("vlan:3".parse::<NodeKey>().is_err());
    }
}
