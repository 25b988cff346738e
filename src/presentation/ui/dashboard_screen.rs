//! Dashboard screen state and key handling.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use crate::application::BusyGuard;
use crate::domain::entities::{CacheServerInfo, SessionSnapshot};
use crate::domain::keybinding::{Action, Keybind};
use crate::domain::ControlId;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ActionsPanel, AnalyticsView, AttributeForm, FooterBar, FormOutcome, HeaderBar, HealthPanel,
    InfoPanel, SessionPanel, StreamStatus,
};

/// Which component currently owns key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFocus {
    #[default]
    Actions,
    AttributeForm,
    Analytics,
}

/// What the screen asks the app to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    None,
    Quit,
    /// A dashboard operation resolved from a shortcut or the actions list.
    Invoke(Action),
    /// The attribute form was submitted; values are trimmed, not yet
    /// validated.
    SubmitAttribute { key: String, value: String },
}

/// Everything the render pass needs besides the screen's own state.
pub struct RenderContext<'a> {
    pub guard: &'a BusyGuard,
    pub theme: &'a Theme,
    pub timestamp_format: &'a str,
    pub stream_status: StreamStatus,
    pub auto_refresh: Option<u64>,
    pub keybinds: &'a [Keybind],
}

pub struct DashboardState {
    pub snapshot: Option<SessionSnapshot>,
    pub server_info: Option<CacheServerInfo>,
    selected_action: usize,
    focus: DashboardFocus,
    form: AttributeForm,
    analytics: Option<String>,
    analytics_scroll: u16,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: None,
            server_info: None,
            selected_action: 0,
            focus: DashboardFocus::Actions,
            form: AttributeForm::new(),
            analytics: None,
            analytics_scroll: 0,
        }
    }

    #[must_use]
    pub const fn focus(&self) -> DashboardFocus {
        self.focus
    }

    #[must_use]
    pub fn selected_control(&self) -> ControlId {
        ControlId::ALL[self.selected_action]
    }

    pub fn open_attribute_form(&mut self) {
        self.focus = DashboardFocus::AttributeForm;
    }

    pub fn close_attribute_form(&mut self) {
        self.form.clear();
        self.focus = DashboardFocus::Actions;
    }

    pub fn open_analytics(&mut self, body: String) {
        self.analytics = Some(body);
        self.analytics_scroll = 0;
        self.focus = DashboardFocus::Analytics;
    }

    pub fn close_analytics(&mut self) {
        self.analytics = None;
        self.focus = DashboardFocus::Actions;
    }

    pub fn handle_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> ScreenOutcome {
        match self.focus {
            DashboardFocus::Analytics => self.handle_analytics_key(key),
            DashboardFocus::AttributeForm => self.handle_form_key(key),
            DashboardFocus::Actions => self.handle_actions_key(key, registry),
        }
    }

    fn handle_analytics_key(&mut self, key: KeyEvent) -> ScreenOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_analytics(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.analytics_scroll = self.analytics_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.analytics_scroll = self.analytics_scroll.saturating_sub(1);
            }
            _ => {}
        }
        ScreenOutcome::None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> ScreenOutcome {
        match self.form.handle_key(key) {
            FormOutcome::Cancel => {
                self.close_attribute_form();
                ScreenOutcome::None
            }
            FormOutcome::Submit { key, value } => ScreenOutcome::SubmitAttribute { key, value },
            FormOutcome::Pending => ScreenOutcome::None,
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> ScreenOutcome {
        let Some(action) = registry.find_action(key) else {
            return ScreenOutcome::None;
        };

        match action {
            Action::Quit => ScreenOutcome::Quit,
            Action::NavigateUp => {
                self.selected_action = self
                    .selected_action
                    .checked_sub(1)
                    .unwrap_or(ControlId::ALL.len() - 1);
                ScreenOutcome::None
            }
            Action::NavigateDown => {
                self.selected_action = (self.selected_action + 1) % ControlId::ALL.len();
                ScreenOutcome::None
            }
            Action::Select => {
                let control = self.selected_control();
                if control == ControlId::SetAttribute {
                    self.open_attribute_form();
                    ScreenOutcome::None
                } else {
                    ScreenOutcome::Invoke(control_action(control))
                }
            }
            Action::EditAttribute => {
                self.open_attribute_form();
                ScreenOutcome::None
            }
            Action::Cancel | Action::FocusNext => ScreenOutcome::None,
            other => ScreenOutcome::Invoke(other),
        }
    }

    /// Values submitted from the form, validated: both non-empty after
    /// trimming.
    #[must_use]
    pub fn validated_form(&self) -> Option<(String, String)> {
        self.form.validated()
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        let form_open = self.focus == DashboardFocus::AttributeForm;
        let mut constraints = vec![Constraint::Length(1), Constraint::Min(8)];
        if form_open {
            constraints.push(Constraint::Length(6));
        }
        constraints.push(Constraint::Length(1));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        HeaderBar::new(self.snapshot.as_ref(), ctx.theme).render(rows[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        SessionPanel::new(self.snapshot.as_ref(), ctx.timestamp_format, ctx.theme)
            .render(columns[0], buf);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Min(6),
            ])
            .split(columns[1]);

        let health = self.snapshot.as_ref().map(|s| &s.redis_health);
        let performance = self.snapshot.as_ref().map(|s| &s.performance);
        HealthPanel::new(health, performance, ctx.theme).render(right[0], buf);
        InfoPanel::new(self.server_info.as_ref(), ctx.theme).render(right[1], buf);
        ActionsPanel::new(
            ctx.guard,
            self.selected_action,
            self.focus == DashboardFocus::Actions,
            ctx.theme,
        )
        .render(right[2], buf);

        if form_open {
            self.form.render(rows[2], buf, ctx.theme);
        }

        let footer = rows[rows.len() - 1];
        FooterBar::new(ctx.keybinds, ctx.theme)
            .stream_status(ctx.stream_status)
            .auto_refresh(ctx.auto_refresh)
            .render(footer, buf);

        if let Some(body) = &self.analytics {
            AnalyticsView::new(body, self.analytics_scroll, ctx.theme).render(area, buf);
        }
    }
}

/// Maps an actions-panel entry to the operation it triggers.
#[must_use]
pub fn control_action(control: ControlId) -> Action {
    match control {
        ControlId::Refresh => Action::Refresh,
        ControlId::CheckHealth => Action::CheckHealth,
        ControlId::PerformanceTest => Action::PerformanceTest,
        ControlId::SetAttribute => Action::EditAttribute,
        ControlId::ViewAnalytics => Action::ViewAnalytics,
        ControlId::ExportData => Action::ExportData,
        ControlId::CopySessionId => Action::CopySessionId,
        ControlId::ToggleAutoRefresh => Action::ToggleAutoRefresh,
    }
}
