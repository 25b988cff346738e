//! Bottom bar with shortcut hints and background status.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;

/// State of the push-update subscription, pinned in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    #[default]
    Connecting,
    Live,
    Offline,
}

impl StreamStatus {
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Connecting => "events: ...",
            Self::Live => "events: live",
            Self::Offline => "events: offline",
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Connecting => Color::DarkGray,
            Self::Live => Color::Green,
            Self::Offline => Color::Red,
        }
    }
}

pub struct FooterBar<'a> {
    keybinds: &'a [Keybind],
    stream_status: StreamStatus,
    auto_refresh: Option<u64>,
    theme: &'a Theme,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybinds: &'a [Keybind], theme: &'a Theme) -> Self {
        Self {
            keybinds,
            stream_status: StreamStatus::default(),
            auto_refresh: None,
            theme,
        }
    }

    #[must_use]
    pub const fn stream_status(mut self, status: StreamStatus) -> Self {
        self.stream_status = status;
        self
    }

    /// Interval in seconds when the auto-refresh timer is running.
    #[must_use]
    pub const fn auto_refresh(mut self, interval_seconds: Option<u64>) -> Self {
        self.auto_refresh = interval_seconds;
        self
    }
}

/// Human-readable form of a key event, e.g. `Ctrl+R` or `q`.
#[must_use]
pub fn format_key(key: KeyEvent) -> String {
    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    match key.code {
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        KeyCode::Enter => out.push_str("Enter"),
        KeyCode::Esc => out.push_str("Esc"),
        KeyCode::Tab => out.push_str("Tab"),
        KeyCode::Up => out.push('↑'),
        KeyCode::Down => out.push('↓'),
        other => out.push_str(&format!("{other:?}")),
    }
    out
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for bind in self.keybinds.iter().filter(|b| b.visible_in_bar) {
            if !spans.is_empty() {
                spans.push(Span::styled(" │ ", self.theme.dimmed_style));
            }
            spans.push(Span::styled(format_key(bind.key), key_style));
            spans.push(Span::raw(" "));
            spans.push(Span::raw(bind.label.to_string()));
        }

        let mut right = String::new();
        if let Some(interval) = self.auto_refresh {
            right.push_str(&format!("auto: {interval}s · "));
        }
        right.push_str(self.stream_status.display());

        let left_width: usize = spans.iter().map(|s| s.content.len()).sum();
        let padding = (area.width as usize)
            .saturating_sub(left_width)
            .saturating_sub(right.len() + 1);
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
        }
        spans.push(Span::styled(
            right,
            Style::default().fg(self.stream_status.color()),
        ));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('r'), KeyModifiers::CONTROL, "Ctrl+R" ; "ctrl_key")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, "q" ; "bare_key")]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE, "Enter" ; "enter")]
    #[test_case(KeyCode::Esc, KeyModifiers::NONE, "Esc" ; "escape")]
    fn test_format_key(code: KeyCode, modifiers: KeyModifiers, expected: &str) {
        assert_eq!(format_key(KeyEvent::new(code, modifiers)), expected);
    }

    #[test]
    fn test_stream_status_display() {
        assert_eq!(StreamStatus::Live.display(), "events: live");
        assert_eq!(StreamStatus::Offline.display(), "events: offline");
    }
}
