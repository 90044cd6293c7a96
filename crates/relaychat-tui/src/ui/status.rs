//! Status bar
//!
//! Displays the session label and the key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relaychat_app::Tone;

use crate::View;

const KEY_HINTS: &str = " | Tab: switch field | Enter: connect/send | Ctrl+d: disconnect | Esc: quit";

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &View, area: Rect) {
    let color = match view.status.tone {
        Tone::Affirmative => Color::Green,
        Tone::Alert => Color::Red,
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(view.status.label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(KEY_HINTS, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
