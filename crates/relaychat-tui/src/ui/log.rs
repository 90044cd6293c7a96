//! Message log
//!
//! Displays received messages, newest at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_app::LogEntry;

const BORDER_SIZE: u16 = 2;

/// Render the message log.
pub fn render(frame: &mut Frame, log: &[LogEntry], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Messages ");

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let skip = log.len().saturating_sub(visible_height);

    let items: Vec<ListItem> = log
        .iter()
        .skip(skip)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}:", entry.display_name),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(entry.text.as_str()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
