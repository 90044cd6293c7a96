//! Inline error banners

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};
use relaychat_app::BannerView;

/// Render a banner line. Hidden banners leave the line blank.
pub fn render(frame: &mut Frame, banner: BannerView, area: Rect) {
    if !banner.visible {
        return;
    }

    let paragraph = Paragraph::new(format!(" {}", banner.text)).style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, area);
}
