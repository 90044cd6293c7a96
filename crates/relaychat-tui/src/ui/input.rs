//! Text fields
//!
//! Renders a bordered single-line field and places the terminal cursor in it
//! when focused.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

const PROMPT_WIDTH: u16 = 3; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render a field. `cursor` is the character position to show, if focused.
pub fn render(frame: &mut Frame, title: &str, text: &str, cursor: Option<usize>, area: Rect) {
    let border_color = if cursor.is_some() { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title.to_string());

    let paragraph =
        Paragraph::new(format!("> {text}")).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);

    let Some(cursor) = cursor else {
        return;
    };

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = u16::try_from(cursor).unwrap_or(u16::MAX).min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
