//! TUI view components
//!
//! Each component renders one part of the interface.

mod detail;
mod footer;
mod header;
mod help;
pub mod helpers;
mod tree;

pub use detail::*;
pub use footer::*;
pub use header::*;
pub use help::*;
pub use tree::*;
