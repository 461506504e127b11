//! Tests for building the static part of the trees
//!
//! Covers idempotent builds, input-order preservation, orphan and cycle
//! handling, and the topology builder.

use cmns_tree::models::{Device, NodeKey, NodeType, Section, Site, Subnet};
use cmns_tree::tree::{ancestor_path, build_ipam_tree, build_topology_tree, TreeNode};

fn section(id: &str, name: &str, parent: Option<&str>) -> Section {
    Section {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        master_section: parent.map(str::to_string),
    }
}

fn subnet(id: &str, net: &str, section_id: &str, master: Option<&str>) -> Subnet {
    Subnet {
        id: id.to_string(),
        subnet: net.to_string(),
        mask: 24,
        description: None,
        section_id: section_id.to_string(),
        master_subnet_id: master.map(str::to_string),
    }
}

fn device(id: &str, site_id: &str) -> Device {
    Device {
        id: id.to_string(),
        name: format!("dev-{}", id),
        site_id: site_id.to_string(),
        ip_address: None,
        os: None,
        status: None,
    }
}

fn site(id: &str, name: &str) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        location: None,
    }
}

fn ids(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(TreeNode::id).collect()
}

#[test]
fn test_build_is_idempotent() {
    let sections = vec![
        section("1", "Core", None),
        section("2", "Edge", None),
        section("3", "Core/DC1", Some("1")),
    ];
    let subnets = vec![
        subnet("10", "10.0.0.0", "1", None),
        subnet("11", "10.0.1.0", "3", Some("0")),
        subnet("12", "10.0.2.0", "3", Some("11")),
    ];

    let first = build_ipam_tree(None, &sections, &subnets);
    let second = build_ipam_tree(None, &sections, &subnets);
    assert_eq!(first, second);
}

#[test]
fn test_root_order_follows_input() {
    let sections = vec![
        section("A", "A", None),
        section("B", "B", None),
        section("C", "C", Some("A")),
    ];

    let tree = build_ipam_tree(None, &sections, &[]);

    assert_eq!(ids(&tree), vec!["A", "B"]);
    assert_eq!(ids(&tree[0].children), vec!["C"]);
    assert!(tree[1].children.is_empty());
}

#[test]
fn test_child_sections_come_before_subnets() {
    let sections = vec![section("1", "Core", None), section("2", "DC1", Some("1"))];
    let subnets = vec![
        subnet("20", "10.1.0.0", "1", None),
        subnet("21", "10.2.0.0", "1", Some("")),
    ];

    let tree = build_ipam_tree(None, &sections, &subnets);
    let kinds: Vec<(NodeType, &str)> = tree[0]
        .children
        .iter()
        .map(|n| (n.node_type(), n.id()))
        .collect();

    assert_eq!(
        kinds,
        vec![
            (NodeType::Section, "2"),
            (NodeType::Subnet, "20"),
            (NodeType::Subnet, "21"),
        ]
    );
}

#[test]
fn test_nested_subnets_are_left_for_lazy_loading() {
    let sections = vec![section("1", "Core", None)];
    let subnets = vec![
        subnet("10", "10.0.0.0", "1", None),
        subnet("11", "10.0.0.0", "1", Some("10")),
    ];

    let tree = build_ipam_tree(None, &sections, &subnets);
    let subnet_node = &tree[0].children[0];

    assert_eq!(ids(&tree[0].children), vec!["10"]);
    assert!(subnet_node.has_unknown_children);
    assert!(subnet_node.children.is_empty());
    assert!(!tree[0].has_unknown_children);
}

#[test]
fn test_orphan_section_becomes_root() {
    let sections = vec![
        section("1", "Core", None),
        section("2", "Stray", Some("nonexistent-id")),
    ];

    let tree = build_ipam_tree(None, &sections, &[]);

    assert_eq!(ids(&tree), vec!["1", "2"]);
}

#[test]
fn test_zero_parent_section_is_root() {
    let sections = vec![
        section("1", "Core", Some("0")),
        section("2", "DC1", Some("1")),
    ];

    let tree = build_ipam_tree(None, &sections, &[]);

    assert_eq!(ids(&tree), vec!["1"]);
    assert_eq!(ids(&tree[0].children), vec!["2"]);
}

#[test]
fn test_cycle_members_are_not_lost() {
    let sections = vec![
        section("1", "Root", None),
        section("2", "Loop A", Some("3")),
        section("3", "Loop B", Some("2")),
    ];

    let tree = build_ipam_tree(None, &sections, &[]);

    let mut seen: Vec<&str> = Vec::new();
    fn walk<'a>(nodes: &'a [TreeNode], seen: &mut Vec<&'a str>) {
        for node in nodes {
            seen.push(node.id());
            walk(&node.children, seen);
        }
    }
    walk(&tree, &mut seen);
    seen.sort();
    assert_eq!(seen, vec!["1", "2", "3"]);
}

#[test]
fn test_subnet_with_missing_section_is_skipped() {
    let sections = vec![section("1", "Core", None)];
    let subnets = vec![
        subnet("10", "10.0.0.0", "1", None),
        subnet("11", "10.9.0.0", "404", None),
    ];

    let tree = build_ipam_tree(None, &sections, &subnets);

    assert_eq!(ids(&tree), vec!["1"]);
    assert_eq!(ids(&tree[0].children), vec!["10"]);
}

#[test]
fn test_build_children_of_a_section() {
    let sections = vec![section("1", "Core", None), section("2", "DC1", Some("1"))];
    let subnets = vec![subnet("10", "10.0.0.0", "1", None)];

    let children = build_ipam_tree(Some("1"), &sections, &subnets);

    assert_eq!(ids(&children), vec!["2", "10"]);
}

#[test]
fn test_topology_sites_are_lazy_without_devices() {
    let sites = vec![site("1", "Lab"), site("2", "HQ")];

    let tree = build_topology_tree(&sites, &[]);

    assert_eq!(ids(&tree), vec!["1", "2"]);
    assert!(tree.iter().all(|n| n.has_unknown_children));
}

#[test]
fn test_topology_attaches_supplied_devices() {
    let sites = vec![site("1", "Lab"), site("2", "HQ")];
    let devices = vec![device("a", "2"), device("b", "2"), device("x", "9")];

    let tree = build_topology_tree(&sites, &devices);

    assert!(tree[0].has_unknown_children);
    assert!(!tree[1].has_unknown_children);
    assert_eq!(ids(&tree[1].children), vec!["a", "b"]);
    assert_eq!(tree[1].children[0].parent_id.as_deref(), Some("2"));
}

#[test]
fn test_ancestor_path_of_nested_subnet() {
    let sections = vec![section("1", "Core", None), section("2", "DC1", Some("1"))];
    let subnets = vec![subnet("10", "10.0.0.0", "2", None)];
    let tree = build_ipam_tree(None, &sections, &subnets);

    let path = ancestor_path(&tree, &NodeKey::new(NodeType::Subnet, "10"));

    assert_eq!(
        path,
        Some(vec![
            NodeKey::new(NodeType::Section, "1"),
            NodeKey::new(NodeType::Section, "2"),
        ])
    );
    assert_eq!(ancestor_path(&tree, &NodeKey::new(NodeType::Subnet, "99")), None);
}
