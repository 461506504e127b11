//! CLI command handling module
//!
//! Handles the non-interactive subcommands and logging setup.

mod config;
mod logging;
mod print;

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use print::{PrintOptions, render_tree};
