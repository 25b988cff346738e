//! Actions panel: the dashboard's "buttons".

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::application::BusyGuard;
use crate::domain::ControlId;
use crate::presentation::theme::Theme;

pub struct ActionsPanel<'a> {
    guard: &'a BusyGuard,
    selected: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ActionsPanel<'a> {
    #[must_use]
    pub fn new(guard: &'a BusyGuard, selected: usize, focused: bool, theme: &'a Theme) -> Self {
        Self {
            guard,
            selected,
            focused,
            theme,
        }
    }
}

impl Widget for ActionsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL).title(" Actions ");
        if self.focused {
            block = block.border_style(Style::default().fg(self.theme.accent));
        }

        let lines: Vec<Line> = ControlId::ALL
            .into_iter()
            .enumerate()
            .map(|(index, control)| {
                let label = self.guard.label(control);
                let busy = self.guard.is_busy(control);

                let mut style = if busy {
                    // A busy control is disabled: dimmed until released.
                    self.theme.dimmed_style.add_modifier(Modifier::ITALIC)
                } else {
                    self.theme.base_style
                };
                if index == self.selected && self.focused {
                    style = style.patch(self.theme.selection_style);
                }

                let marker = if busy { "… " } else { "▸ " };
                Line::from(Span::styled(format!("{marker}{label}"), style))
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
