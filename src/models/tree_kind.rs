//! Which navigation tree a view shows

use super::NodeType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    /// Sections, subnets and addresses
    #[default]
    Ipam,
    /// Sites and devices
    Topology,
}

impl TreeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeKind::Ipam => "ipam",
            TreeKind::Topology => "topology",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TreeKind::Ipam => "IPAM",
            TreeKind::Topology => "Topology",
        }
    }

    pub fn all() -> &'static [TreeKind] {
        &[TreeKind::Ipam, TreeKind::Topology]
    }

    /// Tree a node type is shown in
    pub fn of(node_type: NodeType) -> TreeKind {
        match node_type {
            NodeType::Section | NodeType::Subnet | NodeType::Address => TreeKind::Ipam,
            NodeType::Site | NodeType::Device => TreeKind::Topology,
        }
    }

    pub fn next(&self) -> TreeKind {
        match self {
            TreeKind::Ipam => TreeKind::Topology,
            TreeKind::Topology => TreeKind::Ipam,
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ipam" => Ok(TreeKind::Ipam),
            "topology" | "topo" => Ok(TreeKind::Topology),
            _ => Err(format!("Unknown view '{}', expected ipam or topology", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("IPAM".parse::<TreeKind>(), Ok(TreeKind::Ipam));
        assert_eq!("topo".parse::<TreeKind>(), Ok(TreeKind::Topology));
        assert!("devices".parse::<TreeKind>().is_err());
    }

    #[test]
    fn test_of_node_type() {
        assert_eq!(TreeKind::of(NodeType::Address), TreeKind::Ipam);
        assert_eq!(TreeKind::of(NodeType::Device), TreeKind::Topology);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(TreeKind::Ipam.next().next(), TreeKind::Ipam);
    }
}
