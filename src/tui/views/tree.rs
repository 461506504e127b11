//! Tree view rendering

use crate::models::NodeKey;
use crate::tree::{RowState, RowView};
use crate::tui::app::LoadState;
use crate::tui::constants::{ASCII_SPINNER_FRAMES, SCROLL_BUFFER, SPINNER_FRAMES};
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{
    create_themed_block, render_empty_state, render_loading_state, update_scroll_offset,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Display switches for the tree view
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderOptions {
    /// ASCII glyphs only
    pub no_icons: bool,
    /// Animation tick for the loading spinner
    pub tick: usize,
}

/// Render the visible rows of a tree with the cursor highlighted
#[allow(clippy::too_many_arguments)]
pub fn render_tree_view(
    f: &mut Frame,
    area: Rect,
    rows: &[RowView],
    cursor: usize,
    scroll_offset: &mut usize,
    load_state: &LoadState,
    selected: Option<&NodeKey>,
    filter: &str,
    theme: &Theme,
    options: TreeRenderOptions,
) {
    if rows.is_empty() {
        match load_state {
            LoadState::Idle | LoadState::Loading => {
                render_loading_state(f, area, "Tree", "Loading inventory...", theme)
            }
            LoadState::Failed(message) => render_empty_state(
                f,
                area,
                "Tree",
                &format!("Failed to load: {}", message),
                "Press R to retry",
                theme,
            ),
            LoadState::Ready if !filter.is_empty() => render_empty_state(
                f,
                area,
                "Tree",
                &format!("No rows match '{}'", filter),
                "Press Esc to clear the filter",
                theme,
            ),
            LoadState::Ready => render_empty_state(
                f,
                area,
                "Tree",
                "No entries",
                "Press R to reload",
                theme,
            ),
        }
        return;
    }

    let visible_height = (area.height as usize).saturating_sub(2);
    let cursor = cursor.min(rows.len() - 1);
    update_scroll_offset(cursor, visible_height, scroll_offset, SCROLL_BUFFER);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, row)| {
            let is_selected = selected == Some(&row.key);
            let mut line = tree_row_line(row, is_selected, theme, options);
            if index == cursor {
                line = line.style(theme.table_selected_style());
            }
            line
        })
        .collect();

    let title = format!("Tree ({})", rows.len());
    let paragraph = Paragraph::new(lines).block(create_themed_block(&title, theme));
    f.render_widget(paragraph, area);
}

/// One row: guides, disclosure marker, type icon, label, error hint
pub fn tree_row_line<'a>(
    row: &'a RowView,
    is_selected: bool,
    theme: &Theme,
    options: TreeRenderOptions,
) -> Line<'a> {
    let ascii = options.no_icons;
    let marker = match &row.state {
        RowState::Loading => {
            let frames = if ascii {
                ASCII_SPINNER_FRAMES
            } else {
                SPINNER_FRAMES
            };
            frames[options.tick % frames.len()]
        }
        state if ascii => state.ascii_marker(),
        state => state.marker(),
    };
    let icon = if ascii {
        row.node_type().ascii_icon()
    } else {
        row.node_type().icon()
    };

    let mut label_style = theme.node_style(row.node_type());
    if is_selected {
        label_style = label_style
            .fg(theme.table_chosen)
            .add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![
        Span::styled(row.prefix(ascii), theme.guides_style()),
        Span::styled(marker, theme.row_state_style(&row.state)),
        Span::raw(" "),
        Span::styled(format!("{} ", icon), theme.node_style(row.node_type())),
        Span::styled(row.label.as_str(), label_style),
    ];

    if let RowState::Failed(message) = &row.state {
        spans.push(Span::styled(
            format!("  {} (toggle to retry)", message),
            Style::default().fg(theme.state_failed),
        ));
    }

    Line::from(spans)
}
