//! Help view rendering

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const TREE_ITEMS: &[(&str, &str)] = &[
    ("<space> <l> <→>", "Expand / collapse"),
    ("<h> <←>", "Collapse or go to parent"),
    ("<c>", "Collapse all"),
    ("<Enter>", "Select node"),
    ("<r>", "Refresh children"),
    ("<R>", "Reload the whole tree"),
];

const GENERAL_ITEMS: &[(&str, &str)] = &[
    ("<j> <↓>", "Move down"),
    ("<k> <↑>", "Move up"),
    ("<g> <G>", "First / last row"),
    ("<PgUp> <PgDn>", "Page up / down"),
    ("<Tab>", "Switch IPAM / topology"),
    ("</>", "Filter rows"),
    ("<?>", "Show/hide help"),
    ("<Esc>", "Clear / back / quit"),
    ("<q>", "Quit"),
];

/// Render the help view in two columns
pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_label));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner_area);

    render_help_column(f, columns[0], "TREE", TREE_ITEMS, theme);
    render_help_column(f, columns[1], "GENERAL", GENERAL_ITEMS, theme);
}

fn render_help_column(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: &[(&str, &str)],
    theme: &Theme,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.header_title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, description) in items {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key_style()),
            Span::styled(description.to_string(), Style::default().fg(theme.text_primary)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}
