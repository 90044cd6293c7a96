//! Modal alert
//!
//! A centered popup drawn over the rest of the UI. Any key dismisses it.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const POPUP_MAX_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 5;

/// Render the alert popup.
pub fn render(frame: &mut Frame, message: &str) {
    let area = popup_area(frame.area());

    let text = vec![
        Line::from(Span::styled(message, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow)));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn popup_area(screen: Rect) -> Rect {
    let width = screen.width.min(POPUP_MAX_WIDTH);
    let height = screen.height.min(POPUP_HEIGHT);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}
