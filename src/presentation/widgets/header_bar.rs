//! Top bar with session identity.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::SessionSnapshot;
use crate::presentation::theme::Theme;

pub struct HeaderBar<'a> {
    snapshot: Option<&'a SessionSnapshot>,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(snapshot: Option<&'a SessionSnapshot>, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::styled(" oxidash ", title_style)];

        if let Some(snapshot) = self.snapshot {
            spans.push(Span::styled("session ", self.theme.dimmed_style));
            spans.push(Span::raw(snapshot.short_id().to_string()));
            spans.push(Span::styled(
                format!("  {} · {}", snapshot.region, snapshot.container_info),
                self.theme.dimmed_style,
            ));
            if snapshot.is_new {
                spans.push(Span::styled("  new", Style::default().fg(self.theme.accent)));
            }
        } else {
            spans.push(Span::styled("no session loaded", self.theme.dimmed_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
