//! Constants used throughout the TUI module

/// Status message timeout in seconds
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

/// Header height including borders
pub const HEADER_HEIGHT: u16 = 4;

/// Footer height including borders
pub const FOOTER_HEIGHT: u16 = 3;

/// Share of the body width given to the tree (the detail pane gets the rest)
pub const TREE_PANE_PERCENT: u16 = 60;

/// Rows kept visible above/below the cursor before scrolling
pub const SCROLL_BUFFER: usize = 2;

/// Input poll interval of the main loop in milliseconds
pub const EVENT_POLL_MS: u64 = 100;

/// Spinner frames for rows whose children are loading
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// ASCII spinner frames (`ui.noIcons`)
pub const ASCII_SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];
