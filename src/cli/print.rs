//! Headless tree printing
//!
//! Renders a tree to plain text without a terminal UI: expands the requested
//! nodes (fetching their children as needed) and dumps the visible rows.

use crate::config::Config;
use crate::models::{NodeKey, TreeKind};
use crate::services::InventoryService;
use crate::tree::{TreeAction, TreeStore, format_rows};
use anyhow::Result;

/// What to print
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    pub view: TreeKind,
    /// Node to reveal and select
    pub focus: Option<NodeKey>,
    /// Nodes to expand, in order; later keys may live under earlier ones
    pub expand: Vec<NodeKey>,
    /// Keep only rows matching this text (plus their ancestors)
    pub filter: Option<String>,
    pub ascii: bool,
}

/// Build, expand and render one tree
pub async fn render_tree(
    service: &InventoryService,
    config: &Config,
    options: &PrintOptions,
) -> Result<String> {
    let roots = service.load(options.view).await?;
    let fetcher = service.fetcher();
    let mut store = TreeStore::new(roots);

    for key in &options.expand {
        if store.find_node(key).is_none() {
            anyhow::bail!(
                "{} is not in the {} tree (expand its parent first)",
                key,
                options.view
            );
        }
        let effects = store.dispatch(TreeAction::Expand(key.clone()));
        store.settle(fetcher.as_ref(), effects).await;
    }

    if let Some(focus) = &options.focus {
        if store.find_node(focus).is_none() {
            anyhow::bail!("{} is not in the {} tree", focus, options.view);
        }
        if config.tree.reveal_focus {
            let effects = store.reveal(focus).unwrap_or_default();
            store.settle(fetcher.as_ref(), effects).await;
        }
        store.dispatch(TreeAction::Select(focus.clone()));
    }

    let rows = match options.filter.as_deref() {
        Some(query) => store.filtered_rows(query),
        None => store.rows(),
    };
    store.dispatch(TreeAction::Teardown);

    Ok(format_rows(&rows, options.ascii))
}
