//! Session details and custom attributes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::SessionSnapshot;
use crate::presentation::theme::Theme;

pub struct SessionPanel<'a> {
    snapshot: Option<&'a SessionSnapshot>,
    timestamp_format: &'a str,
    theme: &'a Theme,
}

impl<'a> SessionPanel<'a> {
    #[must_use]
    pub fn new(
        snapshot: Option<&'a SessionSnapshot>,
        timestamp_format: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            snapshot,
            timestamp_format,
            theme,
        }
    }
}

impl Widget for SessionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Session ");

        let Some(snapshot) = self.snapshot else {
            Paragraph::new(Span::styled("loading...", self.theme.dimmed_style))
                .block(block)
                .render(area, buf);
            return;
        };

        let field = |name: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{name:<10}"), self.theme.dimmed_style),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            field("id", snapshot.session_id.clone()),
            field("user", snapshot.user_id.clone()),
            field(
                "created",
                snapshot
                    .creation_time
                    .format(self.timestamp_format)
                    .to_string(),
            ),
            field(
                "accessed",
                snapshot
                    .last_accessed_time
                    .format(self.timestamp_format)
                    .to_string(),
            ),
            field("requests", snapshot.request_count.to_string()),
        ];

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "attributes",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )));

        if snapshot.custom_attributes.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", self.theme.dimmed_style)));
        } else {
            for (key, value) in &snapshot.custom_attributes {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key}"), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(": ", self.theme.dimmed_style),
                    Span::raw(value.clone()),
                ]));
            }
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
