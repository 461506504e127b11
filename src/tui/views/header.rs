//! Header rendering: view tabs and data source

use crate::models::TreeKind;
use crate::tui::app::LoadState;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_header(
    f: &mut Frame,
    area: Rect,
    active: TreeKind,
    source: &str,
    load_state: &LoadState,
    theme: &Theme,
) {
    let mut tabs = vec![Span::styled("cmns-tree ", theme.header_title_style())];
    for kind in TreeKind::all() {
        tabs.push(Span::raw(" "));
        tabs.push(Span::styled(
            format!("[{}]", kind.title()),
            theme.header_tab_style(*kind == active),
        ));
    }

    let state = match load_state {
        LoadState::Idle => "idle".to_string(),
        LoadState::Loading => "loading".to_string(),
        LoadState::Ready => "ready".to_string(),
        LoadState::Failed(_) => "failed".to_string(),
    };
    let info = Line::from(vec![
        Span::styled("Source: ", Style::default().fg(theme.text_label)),
        Span::styled(source.to_string(), Style::default().fg(theme.header_source)),
        Span::raw("  "),
        Span::styled("State: ", Style::default().fg(theme.text_label)),
        Span::styled(state, Style::default().fg(theme.text_secondary)),
    ]);

    let paragraph =
        Paragraph::new(vec![Line::from(tabs), info]).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
