//! Event handling for the application
//!
//! Keyboard and mouse input: tree navigation, disclosure, selection,
//! filter mode and the help overlay.

use super::core::App;
use crate::tree::{RowState, TreeAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns Some(true) to quit, None for normal continuation
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        self.check_status_message_timeout();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(true);
        }

        if self.ui_state.show_help {
            match key.code {
                KeyCode::Char('q') => return Some(true),
                KeyCode::Char('?') | KeyCode::Esc => self.ui_state.show_help = false,
                _ => {}
            }
            return None;
        }

        if self.ui_state.filter_mode {
            self.handle_filter_key(key);
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(true),
            KeyCode::Esc => {
                if self.ui_state.status_message.is_some() {
                    self.ui_state.status_message = None;
                    self.ui_state.status_message_time = None;
                } else if !self.active_view().filter.is_empty() {
                    self.set_filter(String::new());
                } else {
                    return Some(true);
                }
            }
            KeyCode::Char('?') => self.ui_state.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => self.set_view(self.active.next()),
            KeyCode::Char('/') => self.ui_state.filter_mode = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(self.ui_state.page_size as isize),
            KeyCode::PageUp => self.move_cursor(-(self.ui_state.page_size as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.active_view_mut().cursor = 0,
            KeyCode::Char('G') | KeyCode::End => {
                let last = self.visible_rows().len().saturating_sub(1);
                self.active_view_mut().cursor = last;
            }

            KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right => {
                if let Some(key) = self.cursor_key() {
                    self.dispatch(TreeAction::Toggle(key));
                }
            }
            KeyCode::Char('h') | KeyCode::Left => self.collapse_or_parent(),
            KeyCode::Char('c') => {
                self.dispatch(TreeAction::CollapseAll);
            }
            KeyCode::Enter => {
                if let Some(key) = self.cursor_key() {
                    self.dispatch(TreeAction::Select(key));
                }
            }
            KeyCode::Char('r') => {
                if let Some(key) = self.cursor_key() {
                    if key.node_type.is_lazy() {
                        self.dispatch(TreeAction::Invalidate(key.clone()));
                        self.set_status_message((format!("Refreshing {}", key), false));
                    }
                }
            }
            KeyCode::Char('R') => {
                self.dispatch(TreeAction::InvalidateAll);
                self.async_state.roots_pending.insert(self.active);
                self.set_status_message((
                    format!("Reloading {}", self.active.title()),
                    false,
                ));
            }
            _ => {}
        }

        None
    }

    /// Mouse wheel moves the cursor
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_cursor(1),
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.ui_state.filter_mode = false;
                self.set_filter(String::new());
            }
            KeyCode::Enter => self.ui_state.filter_mode = false,
            KeyCode::Backspace => {
                let mut filter = self.active_view().filter.clone();
                filter.pop();
                self.set_filter(filter);
            }
            KeyCode::Char(c) => {
                let mut filter = self.active_view().filter.clone();
                filter.push(c);
                self.set_filter(filter);
            }
            _ => {}
        }
    }

    fn set_filter(&mut self, filter: String) {
        let view = self.active_view_mut();
        view.filter = filter;
        view.cursor = 0;
        view.scroll_offset = 0;
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let view = self.active_view_mut();
        view.cursor = view.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Collapse the row under the cursor, or jump to its parent row
    fn collapse_or_parent(&mut self) {
        let rows = self.visible_rows();
        let cursor = self.active_view().cursor;
        let Some(row) = rows.get(cursor) else {
            return;
        };

        let collapsible = matches!(
            row.state,
            RowState::Expanded | RowState::Loading | RowState::Unfetched | RowState::Failed(_)
        ) && self.active_view().store.expansion().is_expanded(&row.key);
        if collapsible {
            self.dispatch(TreeAction::Collapse(row.key.clone()));
            return;
        }

        if let Some(parent) = rows[..cursor].iter().rposition(|r| r.depth < row.depth) {
            self.active_view_mut().cursor = parent;
        }
    }
}
