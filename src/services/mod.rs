//! Service layer
//!
//! Sits between the presentation layers (TUI, headless printing) and the
//! data sources, returning built trees and the fetcher for lazy children.

pub mod inventory_service;

pub use inventory_service::InventoryService;
