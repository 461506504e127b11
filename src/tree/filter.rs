//! Row filtering
//!
//! Narrows a rendered row list to rows whose label matches a query, keeping
//! the ancestors of every match so the hierarchy stays readable.

use super::render::RowView;

/// Keep matching rows and their ancestors, in their original order
///
/// Matching is a case-insensitive substring test on the label. An empty or
/// whitespace-only query keeps everything.
pub fn filter_rows(rows: &[RowView], query: &str) -> Vec<RowView> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }

    let mut keep = vec![false; rows.len()];
    // Index of the closest row at each depth above the current one
    let mut ancestors: Vec<usize> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        ancestors.truncate(row.depth);
        if row.label.to_lowercase().contains(&needle) {
            keep[i] = true;
            for &a in &ancestors {
                keep[a] = true;
            }
        }
        ancestors.push(i);
    }

    rows.iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then(|| row.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeKey, NodeType};
    use crate::tree::RowState;

    fn row(id: &str, label: &str, depth: usize) -> RowView {
        RowView {
            key: NodeKey::new(NodeType::Section, id),
            label: label.to_string(),
            depth,
            state: RowState::Leaf,
            is_last: false,
            guides: vec![false; depth],
        }
    }

    #[test]
    fn test_keeps_ancestors_of_matches() {
        let rows = vec![
            row("1", "Datacenter", 0),
            row("2", "Servers", 1),
            row("3", "10.0.0.0/24 (db)", 2),
            row("4", "Clients", 1),
            row("5", "Branch", 0),
        ];
        let kept: Vec<String> = filter_rows(&rows, "DB")
            .into_iter()
            .map(|r| r.key.id)
            .collect();
        assert_eq!(kept, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let rows = vec![row("1", "a", 0), row("2", "b", 0)];
        assert_eq!(filter_rows(&rows, "  ").len(), 2);
    }
}
