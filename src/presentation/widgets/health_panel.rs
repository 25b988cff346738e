//! Cache health panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::entities::{HealthStatus, PerformanceMetrics};
use crate::presentation::theme::Theme;

pub struct HealthPanel<'a> {
    health: Option<&'a HealthStatus>,
    performance: Option<&'a PerformanceMetrics>,
    theme: &'a Theme,
}

impl<'a> HealthPanel<'a> {
    #[must_use]
    pub fn new(
        health: Option<&'a HealthStatus>,
        performance: Option<&'a PerformanceMetrics>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            health,
            performance,
            theme,
        }
    }
}

impl Widget for HealthPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Redis health ");

        let mut lines = Vec::new();
        match self.health {
            Some(health) => {
                let (marker, color) = if health.connected {
                    ("● connected", Color::Green)
                } else {
                    ("○ disconnected", Color::Red)
                };
                lines.push(Line::from(Span::styled(
                    marker,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(vec![
                    Span::styled("status    ", self.theme.dimmed_style),
                    Span::raw(health.status.clone()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("ping      ", self.theme.dimmed_style),
                    Span::raw(format!("{}ms", health.response_time_ms)),
                ]));
            }
            None => lines.push(Line::from(Span::styled(
                "no data",
                self.theme.dimmed_style,
            ))),
        }

        if let Some(perf) = self.performance {
            lines.push(Line::from(vec![
                Span::styled("retrieval ", self.theme.dimmed_style),
                Span::raw(format!("{}ms", perf.session_retrieval_time_ms)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("save      ", self.theme.dimmed_style),
                Span::raw(format!("{}ms", perf.session_save_time_ms)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("conns     ", self.theme.dimmed_style),
                Span::raw(perf.active_connections.to_string()),
            ]));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
