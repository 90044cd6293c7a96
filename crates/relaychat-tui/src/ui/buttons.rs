//! Connect / Disconnect buttons

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use relaychat_app::ButtonsView;

/// Render both buttons; a disabled button is dimmed.
pub fn render(frame: &mut Frame, buttons: ButtonsView, area: Rect) {
    let line = Line::from(vec![
        button("Connect", buttons.connect_enabled),
        Span::raw("  "),
        button("Disconnect", buttons.disconnect_enabled),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn button(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[ {label} ]"), style)
}
