//! Footer view rendering

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Key hints shown when nothing else claims the footer
const NAVIGATION_HINTS: &[(&str, &str)] = &[
    ("j/k", "move"),
    ("space", "toggle"),
    ("h", "collapse"),
    ("enter", "select"),
    ("/", "filter"),
    ("r/R", "refresh"),
    ("tab", "view"),
    ("?", "help"),
    ("q", "quit"),
];

/// Render the footer based on current application state
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    filter_mode: bool,
    filter: &str,
    show_help: bool,
    status_message: &Option<(String, bool)>,
    theme: &Theme,
) {
    let spans: Vec<Span> = if filter_mode {
        vec![
            Span::styled("/", Style::default().fg(theme.filter_prompt)),
            Span::raw(filter.to_string()),
            Span::styled("_", Style::default().fg(theme.filter_prompt)),
        ]
    } else if show_help {
        vec![
            Span::raw("Press "),
            Span::styled("?", theme.footer_key_style()),
            Span::raw(" to hide help"),
        ]
    } else if let Some((msg, is_error)) = status_message {
        vec![Span::styled(msg.clone(), theme.status_style(*is_error))]
    } else {
        let mut spans = Vec::new();
        if !filter.is_empty() {
            spans.push(Span::styled(
                format!("filter: {}  ", filter),
                Style::default().fg(theme.filter_prompt),
            ));
        }
        for (key, action) in NAVIGATION_HINTS {
            spans.push(Span::styled(format!("<{}>", key), theme.footer_key_style()));
            spans.push(Span::raw(format!(" {}  ", action)));
        }
        spans
    };

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
