//! Tagged union over every entity that can be placed in a tree

use super::ipam::{Address, Section, Subnet};
use super::node_type::{NodeKey, NodeType};
use super::topology::{Device, Site};
use serde::{Deserialize, Serialize};

/// Entity carried by a tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodePayload {
    Section(Section),
    Subnet(Subnet),
    Address(Address),
    Site(Site),
    Device(Device),
}

impl NodePayload {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodePayload::Section(_) => NodeType::Section,
            NodePayload::Subnet(_) => NodeType::Subnet,
            NodePayload::Address(_) => NodeType::Address,
            NodePayload::Site(_) => NodeType::Site,
            NodePayload::Device(_) => NodeType::Device,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NodePayload::Section(s) => &s.id,
            NodePayload::Subnet(s) => &s.id,
            NodePayload::Address(a) => &a.id,
            NodePayload::Site(s) => &s.id,
            NodePayload::Device(d) => &d.id,
        }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.node_type(), self.id())
    }

    /// Logical parent id as declared by the entity itself
    pub fn declared_parent_id(&self) -> Option<&str> {
        match self {
            NodePayload::Section(s) => s.parent_id(),
            NodePayload::Subnet(s) if s.is_top_level() => Some(s.section_id.as_str()),
            NodePayload::Subnet(s) => s.master_subnet_id.as_deref(),
            NodePayload::Address(a) => Some(a.subnet_id.as_str()),
            NodePayload::Site(_) => None,
            NodePayload::Device(d) => Some(d.site_id.as_str()),
        }
    }

    /// Display string for the row
    pub fn label(&self) -> String {
        match self {
            NodePayload::Section(s) => s.name.clone(),
            NodePayload::Subnet(s) => match s.description.as_deref() {
                Some(desc) if !desc.is_empty() => format!("{} ({})", s.cidr(), desc),
                _ => s.cidr(),
            },
            NodePayload::Address(a) => match a.hostname.as_deref() {
                Some(host) if !host.is_empty() => format!("{} ({})", a.ip, host),
                _ => a.ip.clone(),
            },
            NodePayload::Site(s) => s.name.clone(),
            NodePayload::Device(d) => d.name.clone(),
        }
    }

    /// Key/value pairs for the detail pane
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        fn push_opt(out: &mut Vec<(&'static str, String)>, name: &'static str, v: &Option<String>) {
            if let Some(value) = v {
                out.push((name, value.clone()));
            }
        }

        let mut out = vec![("Type", self.node_type().to_string()), ("ID", self.id().to_string())];
        match self {
            NodePayload::Section(s) => {
                out.push(("Name", s.name.clone()));
                push_opt(&mut out, "Description", &s.description);
                if let Some(parent) = s.parent_id() {
                    out.push(("Parent section", parent.to_string()));
                }
            }
            NodePayload::Subnet(s) => {
                out.push(("Subnet", s.cidr()));
                push_opt(&mut out, "Description", &s.description);
                out.push(("Section", s.section_id.clone()));
                if !s.is_top_level() {
                    push_opt(&mut out, "Parent subnet", &s.master_subnet_id);
                }
            }
            NodePayload::Address(a) => {
                out.push(("IP", a.ip.clone()));
                push_opt(&mut out, "Hostname", &a.hostname);
                push_opt(&mut out, "Description", &a.description);
                out.push(("Subnet", a.subnet_id.clone()));
            }
            NodePayload::Site(s) => {
                out.push(("Name", s.name.clone()));
                push_opt(&mut out, "Location", &s.location);
            }
            NodePayload::Device(d) => {
                out.push(("Name", d.name.clone()));
                out.push(("Site", d.site_id.clone()));
                push_opt(&mut out, "IP address", &d.ip_address);
                push_opt(&mut out, "OS", &d.os);
                push_opt(&mut out, "Status", &d.status);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_deserialization() {
        let json = r#"{"type": "device", "id": 5, "name": "core-sw1", "site_id": 2}"#;
        let payload: NodePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.key(), NodeKey::new(NodeType::Device, "5"));
        assert_eq!(payload.declared_parent_id(), Some("2"));
        assert_eq!(payload.label(), "core-sw1");
    }

    #[test]
    fn test_address_label_includes_hostname() {
        let payload = NodePayload::Address(Address {
            id: "9".to_string(),
            ip: "10.1.1.5".to_string(),
            hostname: Some("db01".to_string()),
            description: None,
            subnet_id: "4".to_string(),
        });
        assert_eq!(payload.label(), "10.1.1.5 (db01)");
        assert!(payload.fields().contains(&("Hostname", "db01".to_string())));
    }
}
