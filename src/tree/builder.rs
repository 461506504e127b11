//! Node model builder
//!
//! Turns the flat entity lists supplied by the caller into the statically
//! known part of a tree. Builders are pure: the same input always produces a
//! structurally identical tree, and input order is kept (never sorted).
//! Children that can only be known through a fetch are grafted later by the
//! renderer from the child cache.

use super::node::TreeNode;
use crate::models::{Device, NodeKey, NodePayload, Section, Site, Subnet};
use std::collections::{HashMap, HashSet};

struct SectionIndex<'a> {
    sections: &'a [Section],
    /// Effective parent per section after orphan promotion
    parents: Vec<Option<&'a str>>,
    children: HashMap<&'a str, Vec<usize>>,
    subnets: HashMap<&'a str, Vec<&'a Subnet>>,
}

/// Build the IPAM tree: sections, nested sections and their top-level subnets
///
/// With `root_parent_id = None` the roots are the sections without a parent.
/// With `Some(id)` the result is the child list of that section.
///
/// Sections pointing at a parent that is not in `sections` are promoted to
/// roots, as are sections caught in a parent cycle. Subnets nested under
/// another subnet are left for the lazy child cache.
pub fn build_ipam_tree(
    root_parent_id: Option<&str>,
    sections: &[Section],
    subnets: &[Subnet],
) -> Vec<TreeNode> {
    let index = SectionIndex::new(sections, subnets);
    let mut visited = vec![false; sections.len()];

    let mut roots: Vec<TreeNode> = match root_parent_id {
        None => (0..sections.len())
            .filter(|&i| index.parents[i].is_none())
            .filter_map(|i| index.build_section(i, &mut visited))
            .collect(),
        Some(parent) => index.build_children(parent, &mut visited),
    };

    if root_parent_id.is_none() {
        for i in 0..sections.len() {
            if visited[i] {
                continue;
            }
            tracing::warn!(
                "Section {} ({}) is part of a parent cycle, showing it as a root",
                sections[i].id,
                sections[i].name
            );
            if let Some(node) = index.build_section(i, &mut visited) {
                roots.push(node);
            }
        }
    }

    roots
}

impl<'a> SectionIndex<'a> {
    fn new(sections: &'a [Section], subnets: &'a [Subnet]) -> Self {
        let known: HashSet<&str> = sections.iter().map(|s| s.id.as_str()).collect();

        let parents: Vec<Option<&str>> = sections
            .iter()
            .map(|section| match section.parent_id() {
                None => None,
                Some(parent) if parent == section.id => {
                    tracing::warn!("Section {} lists itself as parent", section.id);
                    None
                }
                Some(parent) if known.contains(parent) => Some(parent),
                Some(parent) => {
                    tracing::warn!(
                        "Section {} ({}) references missing parent section {}, showing it as a root",
                        section.id,
                        section.name,
                        parent
                    );
                    None
                }
            })
            .collect();

        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, parent) in parents.iter().enumerate() {
            if let Some(parent) = parent {
                children.entry(*parent).or_default().push(i);
            }
        }

        let mut by_section: HashMap<&str, Vec<&Subnet>> = HashMap::new();
        for subnet in subnets.iter().filter(|s| s.is_top_level()) {
            if known.contains(subnet.section_id.as_str()) {
                by_section
                    .entry(subnet.section_id.as_str())
                    .or_default()
                    .push(subnet);
            } else {
                tracing::warn!(
                    "Subnet {} ({}) references missing section {}, skipping",
                    subnet.id,
                    subnet.cidr(),
                    subnet.section_id
                );
            }
        }

        Self {
            sections,
            parents,
            children,
            subnets: by_section,
        }
    }

    fn build_section(&self, idx: usize, visited: &mut [bool]) -> Option<TreeNode> {
        if visited[idx] {
            return None;
        }
        visited[idx] = true;

        let section = &self.sections[idx];
        let mut node = TreeNode::resolved(
            NodePayload::Section(section.clone()),
            self.parents[idx].map(str::to_string),
        );
        node.children = self.build_children(&section.id, visited);
        Some(node)
    }

    /// Child sections first, then top-level subnets, each in input order
    fn build_children(&self, section_id: &str, visited: &mut [bool]) -> Vec<TreeNode> {
        let mut out: Vec<TreeNode> = self
            .children
            .get(section_id)
            .map(|idxs| {
                idxs.iter()
                    .filter_map(|&i| self.build_section(i, visited))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(subnets) = self.subnets.get(section_id) {
            out.extend(subnets.iter().map(|subnet| {
                TreeNode::from_payload(
                    NodePayload::Subnet((*subnet).clone()),
                    Some(section_id.to_string()),
                )
            }));
        }
        out
    }
}

/// Build the topology tree: every site is a root
///
/// Devices supplied up front are attached to their site, which then counts
/// as resolved. Sites without supplied devices stay lazy.
pub fn build_topology_tree(sites: &[Site], devices: &[Device]) -> Vec<TreeNode> {
    let known: HashSet<&str> = sites.iter().map(|s| s.id.as_str()).collect();

    let mut by_site: HashMap<&str, Vec<&Device>> = HashMap::new();
    for device in devices {
        if known.contains(device.site_id.as_str()) {
            by_site.entry(device.site_id.as_str()).or_default().push(device);
        } else {
            tracing::warn!(
                "Device {} ({}) references missing site {}, skipping",
                device.id,
                device.name,
                device.site_id
            );
        }
    }

    sites
        .iter()
        .map(|site| {
            let payload = NodePayload::Site(site.clone());
            match by_site.get(site.id.as_str()) {
                Some(devices) => {
                    let mut node = TreeNode::resolved(payload, None);
                    node.children = devices
                        .iter()
                        .map(|d| {
                            TreeNode::resolved(
                                NodePayload::Device((*d).clone()),
                                Some(site.id.clone()),
                            )
                        })
                        .collect();
                    node
                }
                None => TreeNode::from_payload(payload, None),
            }
        })
        .collect()
}

/// Keys from a root down to the parent of `target`, in that order
///
/// Returns `None` when the target is not part of the statically built tree.
/// An empty path means the target is itself a root.
pub fn ancestor_path(tree: &[TreeNode], target: &NodeKey) -> Option<Vec<NodeKey>> {
    fn walk(nodes: &[TreeNode], target: &NodeKey, path: &mut Vec<NodeKey>) -> bool {
        for node in nodes {
            if node.is_key(target) {
                return true;
            }
            path.push(node.key());
            if walk(&node.children, target, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    walk(tree, target, &mut path).then_some(path)
}
