//! Theme and color handling.

pub mod adapter;

use std::str::FromStr;

use adapter::ColorConverter;
use ratatui::style::{Color, Style};

use crate::domain::Severity;

/// Resolved styles derived from the configured accent color.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub base_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan")
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let mut selection_bg_hsl = ColorConverter::to_hsl(accent);
        selection_bg_hsl.l = 0.2;
        selection_bg_hsl.s = 0.3;
        let selection_bg = ColorConverter::to_ratatui(selection_bg_hsl);

        Self {
            accent,
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
        }
    }

    /// Color used to style a notification of the given severity.
    #[must_use]
    pub const fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.accent,
            Severity::Success => Color::Green,
            Severity::Warning => Color::Yellow,
            Severity::Danger => Color::Red,
        }
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
    }
    Color::Cyan
}
