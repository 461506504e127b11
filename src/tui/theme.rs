//! Theme and styling definitions
//!
//! Centralized color and style definitions for the tree viewer.

use crate::models::NodeType;
use crate::tree::RowState;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
pub struct Theme {
    // Header colors
    pub header_title: Color,
    pub header_tab_active: Color,
    pub header_tab_inactive: Color,
    pub header_source: Color,

    // Node colors
    pub node_section: Color,
    pub node_subnet: Color,
    pub node_address: Color,
    pub node_site: Color,
    pub node_device: Color,

    // Disclosure state colors
    pub state_loading: Color,
    pub state_failed: Color,
    pub state_unfetched: Color,
    pub tree_guides: Color,

    // List colors
    pub table_selected: Color,
    pub table_selected_bg: Color,
    pub table_chosen: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,
    pub text_value: Color,

    // Input / status colors
    pub filter_prompt: Color,
    pub status_info: Color,
    pub status_error: Color,

    // Footer colors
    pub footer_key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Header colors
            header_title: Color::Cyan,
            header_tab_active: Color::Yellow,
            header_tab_inactive: Color::Gray,
            header_source: Color::Green,

            // Node colors
            node_section: Color::Magenta,
            node_subnet: Color::Cyan,
            node_address: Color::White,
            node_site: Color::Yellow,
            node_device: Color::Green,

            // Disclosure state colors
            state_loading: Color::Yellow,
            state_failed: Color::Red,
            state_unfetched: Color::Gray,
            tree_guides: Color::DarkGray,

            // List colors
            table_selected: Color::Blue,
            table_selected_bg: Color::DarkGray,
            table_chosen: Color::LightGreen,

            // Text colors
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,
            text_value: Color::White,

            // Input / status colors
            filter_prompt: Color::Yellow,
            status_info: Color::Green,
            status_error: Color::Red,

            // Footer colors
            footer_key: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn header_title_style(&self) -> Style {
        Style::default()
            .fg(self.header_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_tab_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.header_tab_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.header_tab_inactive)
        }
    }

    pub fn node_style(&self, node_type: NodeType) -> Style {
        let color = match node_type {
            NodeType::Section => self.node_section,
            NodeType::Subnet => self.node_subnet,
            NodeType::Address => self.node_address,
            NodeType::Site => self.node_site,
            NodeType::Device => self.node_device,
        };
        Style::default().fg(color)
    }

    pub fn row_state_style(&self, state: &RowState) -> Style {
        match state {
            RowState::Loading => Style::default().fg(self.state_loading),
            RowState::Failed(_) => Style::default()
                .fg(self.state_failed)
                .add_modifier(Modifier::BOLD),
            RowState::Unfetched => Style::default().fg(self.state_unfetched),
            _ => Style::default().fg(self.text_secondary),
        }
    }

    pub fn guides_style(&self) -> Style {
        Style::default().fg(self.tree_guides)
    }

    pub fn table_selected_style(&self) -> Style {
        Style::default()
            .fg(self.table_selected)
            .bg(self.table_selected_bg)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn status_style(&self, is_error: bool) -> Style {
        Style::default()
            .fg(if is_error {
                self.status_error
            } else {
                self.status_info
            })
            .add_modifier(Modifier::BOLD)
    }
}
