//! Cache server statistics panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::CacheServerInfo;
use crate::presentation::theme::Theme;

pub struct InfoPanel<'a> {
    info: Option<&'a CacheServerInfo>,
    theme: &'a Theme,
}

impl<'a> InfoPanel<'a> {
    #[must_use]
    pub fn new(info: Option<&'a CacheServerInfo>, theme: &'a Theme) -> Self {
        Self { info, theme }
    }
}

impl Widget for InfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Server ");

        let Some(info) = self.info else {
            Paragraph::new(Span::styled("no data", self.theme.dimmed_style))
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
            field("version", info.version.clone()),
            field("uptime", format!("{}s", info.uptime_seconds)),
            field("clients", info.connected_clients.clone()),
            field("memory", info.used_memory.clone()),
            field("commands", info.total_commands_processed.clone()),
        ];

        let hit_rate = info
            .hit_rate()
            .map_or_else(|| "n/a".to_string(), |rate| format!("{rate:.1}%"));
        lines.push(field("hit rate", hit_rate));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
