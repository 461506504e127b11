//! Node detail pane rendering

use crate::tree::{CacheStatus, TreeNode};
use crate::tui::theme::Theme;
use crate::tui::views::helpers::create_themed_block;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Render the fields of the selected (or highlighted) node
pub fn render_node_detail(
    f: &mut Frame,
    area: Rect,
    node: Option<&TreeNode>,
    status: Option<&CacheStatus>,
    theme: &Theme,
) {
    let Some(node) = node else {
        let paragraph = Paragraph::new(vec![Line::from("No node selected")])
            .block(create_themed_block("Detail", theme))
            .style(Style::default().fg(theme.text_secondary));
        f.render_widget(paragraph, area);
        return;
    };

    let mut lines: Vec<Line> = node
        .payload
        .fields()
        .into_iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", name), Style::default().fg(theme.text_label)),
                Span::styled(value, Style::default().fg(theme.text_value)),
            ])
        })
        .collect();

    if node.has_unknown_children {
        let (text, style) = match status {
            Some(CacheStatus::Loaded) => ("loaded".to_string(), Style::default().fg(theme.status_info)),
            Some(CacheStatus::Loading) => {
                ("loading".to_string(), Style::default().fg(theme.state_loading))
            }
            Some(CacheStatus::Failed(err)) => {
                (format!("failed: {}", err), Style::default().fg(theme.state_failed))
            }
            Some(CacheStatus::NotFetched) | None => (
                "not fetched".to_string(),
                Style::default().fg(theme.state_unfetched),
            ),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Children: ", Style::default().fg(theme.text_label)),
            Span::styled(text, style),
        ]));
    } else if !node.children.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Children: ", Style::default().fg(theme.text_label)),
            Span::raw(node.children.len().to_string()),
        ]));
    }

    let title = format!("{} {}", node.node_type(), node.id());
    let paragraph = Paragraph::new(lines)
        .block(create_themed_block(&title, theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
