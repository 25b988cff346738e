//! Key/value form for setting a session attribute.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
};
use tui_textarea::TextArea;

use crate::presentation::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Key,
    Value,
}

/// What a key press did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Input consumed, form still open.
    Pending,
    /// User submitted; values are trimmed but not yet validated.
    Submit { key: String, value: String },
    /// User closed the form.
    Cancel,
}

pub struct AttributeForm {
    key_input: TextArea<'static>,
    value_input: TextArea<'static>,
    field: FormField,
}

impl Default for AttributeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeForm {
    #[must_use]
    pub fn new() -> Self {
        let mut key_input = TextArea::default();
        key_input.set_placeholder_text("attribute key");
        key_input.set_cursor_line_style(Style::default());

        let mut value_input = TextArea::default();
        value_input.set_placeholder_text("attribute value");
        value_input.set_cursor_line_style(Style::default());

        Self {
            key_input,
            value_input,
            field: FormField::Key,
        }
    }

    /// Trimmed current values.
    #[must_use]
    pub fn values(&self) -> (String, String) {
        let first = |input: &TextArea| {
            input
                .lines()
                .first()
                .map(|line| line.trim().to_string())
                .unwrap_or_default()
        };
        (first(&self.key_input), first(&self.value_input))
    }

    /// Both fields non-empty after trimming, or `None`. A `None` submit
    /// must not produce a network call.
    #[must_use]
    pub fn validated(&self) -> Option<(String, String)> {
        let (key, value) = self.values();
        if key.is_empty() || value.is_empty() {
            return None;
        }
        Some((key, value))
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => FormOutcome::Cancel,
            KeyCode::Enter => {
                let (key, value) = self.values();
                FormOutcome::Submit { key, value }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    FormField::Key => FormField::Value,
                    FormField::Value => FormField::Key,
                };
                FormOutcome::Pending
            }
            _ => {
                let input = match self.field {
                    FormField::Key => &mut self.key_input,
                    FormField::Value => &mut self.value_input,
                };
                input.input(key);
                FormOutcome::Pending
            }
        }
    }

    fn block<'a>(&self, title: &'a str, active: bool, theme: &Theme) -> Block<'a> {
        let mut block = Block::default().borders(Borders::ALL).title(title);
        if active {
            block = block.border_style(Style::default().fg(theme.accent));
        }
        block
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        self.key_input
            .set_block(self.block(" Key ", self.field == FormField::Key, theme));
        self.value_input
            .set_block(self.block(" Value ", self.field == FormField::Value, theme));

        (&self.key_input).render(chunks[0], buf);
        (&self.value_input).render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(form: &mut AttributeForm, code: KeyCode) -> FormOutcome {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(form: &mut AttributeForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_fills_active_field() {
        let mut form = AttributeForm::new();
        type_str(&mut form, "theme");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "dark");

        assert_eq!(form.values(), ("theme".to_string(), "dark".to_string()));
        assert_eq!(
            form.validated(),
            Some(("theme".to_string(), "dark".to_string()))
        );
    }

    #[test]
    fn test_empty_key_fails_validation() {
        let mut form = AttributeForm::new();
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "dark");
        assert_eq!(form.validated(), None);
    }

    #[test]
    fn test_whitespace_only_value_fails_validation() {
        let mut form = AttributeForm::new();
        type_str(&mut form, "theme");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "   ");
        assert_eq!(form.validated(), None);
    }

    #[test]
    fn test_enter_submits_trimmed_values() {
        let mut form = AttributeForm::new();
        type_str(&mut form, " theme ");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "dark");

        assert_eq!(
            press(&mut form, KeyCode::Enter),
            FormOutcome::Submit {
                key: "theme".to_string(),
                value: "dark".to_string()
            }
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = AttributeForm::new();
        assert_eq!(press(&mut form, KeyCode::Esc), FormOutcome::Cancel);
    }

    #[test]
    fn test_clear_resets_fields() {
        let mut form = AttributeForm::new();
        type_str(&mut form, "theme");
        form.clear();
        assert_eq!(form.values(), (String::new(), String::new()));
    }
}
