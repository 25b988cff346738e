use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::Notification;
use crate::presentation::theme::Theme;

const MAX_WIDTH: u16 = 60;
const MAX_HEIGHT: u16 = 10;

/// Transient banner in the top-right corner, styled by severity.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
    theme: &'a Theme,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub fn new(notification: &'a Notification, theme: &'a Theme) -> Self {
        Self {
            notification,
            theme,
        }
    }

    fn popup_area(&self, area: Rect, title: &str) -> Rect {
        let message_width = u16::try_from(self.notification.message.width()).unwrap_or(u16::MAX);
        let title_width = u16::try_from(title.width()).unwrap_or(0);

        // 2 for the borders, 2 for breathing room around the text.
        let width = message_width
            .max(title_width)
            .saturating_add(4)
            .min(MAX_WIDTH)
            .min(area.width.saturating_sub(2));

        let inner = width.saturating_sub(2).max(1);
        let wrapped_lines = message_width.div_ceil(inner);
        let height = wrapped_lines
            .saturating_add(2)
            .clamp(3, MAX_HEIGHT);

        let x = area.width.saturating_sub(width).saturating_sub(2);
        Rect::new(x, 2, width, height)
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.notification.severity.label());

        let popup = self.popup_area(area, &title);
        let visible = area.intersection(popup);
        if visible.area() == 0 {
            return;
        }

        let color = self.theme.severity_color(self.notification.severity);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(color));

        Clear.render(visible, buf);
        Paragraph::new(self.notification.message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(visible, buf);
    }
}
