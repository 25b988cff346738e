use crossterm::event::KeyEvent;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,

    // Dashboard operations
    Refresh,
    CheckHealth,
    PerformanceTest,
    ToggleAutoRefresh,

    // Local utilities
    CopySessionId,
    ExportData,
    ViewAnalytics,
    EditAttribute,

    // Navigation
    NavigateUp,
    NavigateDown,
    Select,
    FocusNext,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }
}
