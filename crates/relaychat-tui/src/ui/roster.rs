//! Client roster
//!
//! Lists the connected client ids in the order the relay sent them.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the roster sidebar.
pub fn render(frame: &mut Frame, roster: &[String], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" Clients ({}) ", roster.len()));

    let items: Vec<ListItem> = roster
        .iter()
        .map(|id| ListItem::new(Line::from(Span::styled(id.as_str(), Style::default().fg(Color::Cyan)))))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
