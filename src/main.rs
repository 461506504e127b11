//! cmns-tree - lazy-loading IPAM and topology tree navigator
//!
//! Browses the CMNS-SDN management API (or a local inventory file) as
//! expandable trees, fetching children only when a node is opened.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmns_tree::cli::{self, ConfigSubcommand, PrintOptions};
use cmns_tree::config::ConfigLoader;
use cmns_tree::models::{NodeKey, TreeKind};
use cmns_tree::services::InventoryService;
use std::path::PathBuf;

/// cmns-tree - browse CMNS-SDN IPAM and topology as lazy trees
#[derive(Parser, Debug)]
#[command(name = "cmns-tree", version)]
#[command(about = "Lazy-loading IPAM and topology tree navigator for the CMNS-SDN management API", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Read the inventory from a YAML/JSON file instead of the API
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Tree to show (ipam or topology)
    #[arg(long, global = true)]
    view: Option<TreeKind>,

    /// Node to reveal and select, as type:id (e.g. subnet:12)
    #[arg(long, global = true)]
    focus: Option<NodeKey>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Print a tree as text without starting the UI
    Print {
        /// Expand a node before printing, as type:id (repeatable)
        #[arg(long = "expand", short = 'e')]
        expand: Vec<NodeKey>,

        /// Keep only rows matching this text, plus their ancestors
        #[arg(long)]
        filter: Option<String>,

        /// Use ASCII tree glyphs
        #[arg(long)]
        ascii: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        other => other,
    };

    let log_file = cli::init_logging(args.debug)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let mut config = ConfigLoader::load().context("Failed to load configuration")?;
    if let Some(view) = args.view {
        config.ui.default_view = view;
    }
    tracing::debug!(
        "Configuration loaded: baseUrl={}, defaultView={}",
        config.api.base_url,
        config.ui.default_view
    );

    let service = InventoryService::from_config(&config, args.fixture.as_deref())?;

    match command {
        Some(Command::Print {
            expand,
            filter,
            ascii,
        }) => {
            let view = args
                .focus
                .as_ref()
                .filter(|_| args.view.is_none())
                .map(|key| TreeKind::of(key.node_type))
                .unwrap_or(config.ui.default_view);
            let options = PrintOptions {
                view,
                focus: args.focus,
                expand,
                filter,
                ascii: ascii || config.ui.no_icons,
            };
            let text = cli::render_tree(&service, &config, &options).await?;
            print!("{}", text);
            Ok(())
        }
        _ => run_viewer(service, config, args.focus).await,
    }
}

#[cfg(feature = "tui")]
async fn run_viewer(
    service: InventoryService,
    config: cmns_tree::config::Config,
    focus: Option<NodeKey>,
) -> Result<()> {
    cmns_tree::tui::run_tui(service, config, cmns_tree::tui::Theme::default(), focus).await
}

#[cfg(not(feature = "tui"))]
async fn run_viewer(
    _service: InventoryService,
    _config: cmns_tree::config::Config,
    _focus: Option<NodeKey>,
) -> Result<()> {
    anyhow::bail!("built without the `tui` feature; use `cmns-tree print`")
}
