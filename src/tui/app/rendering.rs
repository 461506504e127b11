//! Rendering logic for the application

use super::core::App;
use crate::tui::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, TREE_PANE_PERCENT};
use crate::tui::views::*;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        self.ui_state.tick = self.ui_state.tick.wrapping_add(1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        render_header(
            f,
            chunks[0],
            self.active,
            &self.source,
            &self.active_view().load_state,
            &self.theme,
        );

        if self.ui_state.show_help {
            render_help(f, chunks[1], &self.theme);
        } else {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(TREE_PANE_PERCENT),
                    Constraint::Percentage(100 - TREE_PANE_PERCENT),
                ])
                .split(chunks[1]);

            // Borders take two rows
            self.ui_state.page_size = (body[0].height as usize).saturating_sub(2).max(1);

            let rows = self.visible_rows();
            let selected = self.active_view().store.selection().selected().cloned();
            let options = TreeRenderOptions {
                no_icons: self.config.ui.no_icons,
                tick: self.ui_state.tick,
            };
            let view = match self.active {
                crate::models::TreeKind::Ipam => &mut self.ipam,
                crate::models::TreeKind::Topology => &mut self.topology,
            };
            render_tree_view(
                f,
                body[0],
                &rows,
                view.cursor,
                &mut view.scroll_offset,
                &view.load_state,
                selected.as_ref(),
                &view.filter,
                &self.theme,
                options,
            );

            let node = self.detail_node();
            let status = node.map(|n| self.active_view().store.status(&n.key()));
            render_node_detail(f, body[1], node, status, &self.theme);
        }

        render_footer(
            f,
            chunks[2],
            self.ui_state.filter_mode,
            &self.active_view().filter,
            self.ui_state.show_help,
            &self.ui_state.status_message,
            &self.theme,
        );
    }
}
