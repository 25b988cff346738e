use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, key: KeyEvent, is_primary: bool| {
            if is_primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            false,
        );

        // The three shortcuts the web dashboard shipped with, kept on the
        // same letters.
        register(
            Action::Refresh,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::CheckHealth,
            KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::PerformanceTest,
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
            true,
        );

        register(
            Action::ToggleAutoRefresh,
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::CopySessionId,
            KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::ExportData,
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::ViewAnalytics,
            KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::EditAttribute,
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE),
            true,
        );

        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            false,
        );

        register(
            Action::Select,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            true,
        );
        register(
            Action::FocusNext,
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            true,
        );
        register(
            Action::Cancel,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            true,
        );

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Keybinds shown in the footer bar, in display order.
    pub fn footer_binds(&self) -> Vec<Keybind> {
        [
            (Action::Refresh, "Refresh"),
            (Action::CheckHealth, "Health"),
            (Action::PerformanceTest, "Perf"),
            (Action::EditAttribute, "Attr"),
            (Action::ViewAnalytics, "Analytics"),
            (Action::ExportData, "Export"),
            (Action::CopySessionId, "Copy id"),
            (Action::ToggleAutoRefresh, "Auto"),
            (Action::Quit, "Quit"),
        ]
        .into_iter()
        .filter_map(|(action, label)| {
            self.get(action).map(|key| Keybind::new(key, action, label))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('r'), KeyModifiers::CONTROL, Some(Action::Refresh) ; "ctrl_r_refreshes")]
    #[test_case(KeyCode::Char('h'), KeyModifiers::CONTROL, Some(Action::CheckHealth) ; "ctrl_h_checks_health")]
    #[test_case(KeyCode::Char('p'), KeyModifiers::CONTROL, Some(Action::PerformanceTest) ; "ctrl_p_runs_perf_test")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, Some(Action::Quit) ; "q_quits")]
    #[test_case(KeyCode::Char('j'), KeyModifiers::NONE, Some(Action::NavigateDown) ; "j_navigates_down")]
    #[test_case(KeyCode::Char('z'), KeyModifiers::NONE, None ; "unbound_key")]
    #[test_case(KeyCode::Char('r'), KeyModifiers::NONE, None ; "bare_r_is_not_refresh")]
    fn test_find_action(code: KeyCode, modifiers: KeyModifiers, expected: Option<Action>) {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_action(KeyEvent::new(code, modifiers)), expected);
    }

    #[test]
    fn test_footer_lists_primary_shortcuts() {
        let registry = CommandRegistry::new();
        let binds = registry.footer_binds();
        assert!(binds.iter().any(|b| b.action == Action::Refresh));
        assert!(binds.iter().any(|b| b.action == Action::Quit));
    }
}
