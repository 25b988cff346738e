//! Popup showing raw session analytics.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

pub struct AnalyticsView<'a> {
    body: &'a str,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> AnalyticsView<'a> {
    #[must_use]
    pub fn new(body: &'a str, scroll: u16, theme: &'a Theme) -> Self {
        Self {
            body,
            scroll,
            theme,
        }
    }

    /// Centered popup area inside `area`.
    #[must_use]
    pub fn popup_area(area: Rect) -> Rect {
        let width = area.width.saturating_mul(4) / 5;
        let height = area.height.saturating_mul(4) / 5;
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.max(1), height.max(1))
    }
}

impl Widget for AnalyticsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup_area(area);
        let intersection = area.intersection(popup);
        if intersection.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Session analytics (Esc to close) ")
            .border_style(Style::default().fg(self.theme.accent));

        Clear.render(intersection, buf);
        Paragraph::new(self.body)
            .block(block)
            .scroll((self.scroll, 0))
            .render(intersection, buf);
    }
}
