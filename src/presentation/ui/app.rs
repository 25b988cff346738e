//! Main application orchestrator.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use futures_util::future::Either;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::{AutoRefresh, AutoRefreshState, BusyGuard, BusyToken, NotificationCenter, SessionExport};
use crate::domain::keybinding::{Action, Keybind};
use crate::domain::ports::{MonitorPort, NotificationPort, OperationAck};
use crate::domain::{ControlId, HealthStatus, ServerEvent};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::monitor::USER_AGENT;
use crate::infrastructure::{ClipboardService, DesktopNotificationService, EventStreamClient, StreamUpdate};
use crate::presentation::commands::CommandRegistry;
use crate::presentation::events::EventResult;
use crate::presentation::theme::Theme;
use crate::presentation::ui::backend::{Backend, BackendCommand, SnapshotOrigin, UiAction};
use crate::presentation::ui::dashboard_screen::{DashboardState, RenderContext, ScreenOutcome};
use crate::presentation::ui::notification_popup::NotificationPopup;
use crate::presentation::widgets::StreamStatus;

/// Delay between an action's success and the snapshot reload that makes
/// the server-side change visible, mirroring the original dashboard.
const RELOAD_DELAY: Duration = Duration::from_secs(1);
const NOTIFICATION_TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

pub struct App {
    state: AppState,
    screen: DashboardState,
    config: AppConfig,
    monitor: Arc<dyn MonitorPort>,
    events: Option<EventStreamClient>,

    registry: CommandRegistry,
    footer_binds: Vec<Keybind>,
    theme: Theme,

    notifications: NotificationCenter,
    desktop: DesktopNotificationService,
    guard: BusyGuard,
    pending: HashMap<ControlId, BusyToken>,
    auto_refresh: AutoRefresh,
    clipboard: ClipboardService,

    command_tx: mpsc::UnboundedSender<BackendCommand>,
    command_rx: Option<mpsc::UnboundedReceiver<BackendCommand>>,
    action_rx: mpsc::UnboundedReceiver<UiAction>,
    action_tx: mpsc::UnboundedSender<UiAction>,
    tick_tx: mpsc::UnboundedSender<u64>,
    tick_rx: mpsc::UnboundedReceiver<u64>,
    stream_rx: Option<mpsc::UnboundedReceiver<StreamUpdate>>,
    stream_status: StreamStatus,
}

impl App {
    #[must_use]
    pub fn new(
        monitor: Arc<dyn MonitorPort>,
        events: Option<EventStreamClient>,
        config: AppConfig,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();

        let registry = CommandRegistry::new();
        let footer_binds = registry.footer_binds();
        let theme = Theme::new(&config.theme.accent_color);
        let notifications =
            NotificationCenter::new(Duration::from_secs(config.ui.notification_duration));
        let desktop = DesktopNotificationService::new(config.notifications.desktop);

        Self {
            state: AppState::Running,
            screen: DashboardState::new(),
            config,
            monitor,
            events,
            registry,
            footer_binds,
            theme,
            notifications,
            desktop,
            guard: BusyGuard::new(),
            pending: HashMap::new(),
            auto_refresh: AutoRefresh::new(),
            clipboard: ClipboardService::new(),
            command_tx,
            command_rx: Some(command_rx),
            action_rx,
            action_tx,
            tick_tx,
            tick_rx,
            stream_rx: None,
            stream_status: StreamStatus::Connecting,
        }
    }

    /// Runs the dashboard until the user quits.
    ///
    /// # Errors
    /// Returns error if terminal drawing fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let command_rx = self
            .command_rx
            .take()
            .expect("run may only be called once");
        tokio::spawn(Backend::new(self.monitor.clone(), command_rx, self.action_tx.clone()).run());

        if let Some(events) = self.events.take() {
            let (stream_tx, stream_rx) = mpsc::unbounded_channel();
            events.spawn(stream_tx);
            self.stream_rx = Some(stream_rx);
        } else {
            self.stream_status = StreamStatus::Offline;
        }

        // Initial page load: silent, unguarded.
        let _ = self.command_tx.send(BackendCommand::LoadSnapshot {
            origin: SnapshotOrigin::Scheduled,
        });

        if self.config.refresh.auto_start {
            self.start_auto_refresh();
        }

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut notification_interval = interval(NOTIFICATION_TICK);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let stream_future = match &mut self.stream_rx {
                Some(rx) => Either::Left(rx.recv()),
                None => Either::Right(std::future::pending()),
            };
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(update) = stream_future => {
                    self.handle_stream_update(update);
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(generation) = self.tick_rx.recv() => {
                    self.handle_auto_refresh_tick(generation);
                }

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                }

                _ = notification_interval.tick() => {
                    self.notifications.tick();
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        match self.screen.handle_key(key, &self.registry) {
            ScreenOutcome::Quit => EventResult::Exit,
            ScreenOutcome::Invoke(action) => {
                self.handle_invoke(action);
                EventResult::Consumed
            }
            ScreenOutcome::SubmitAttribute { .. } => {
                self.submit_attribute();
                EventResult::Consumed
            }
            ScreenOutcome::None => EventResult::Continue,
        }
    }

    fn handle_invoke(&mut self, action: Action) {
        match action {
            Action::Refresh => {
                if self.guarded_dispatch(
                    ControlId::Refresh,
                    BackendCommand::LoadSnapshot {
                        origin: SnapshotOrigin::Manual,
                    },
                ) {
                    self.notifications.info("Refreshing session data...");
                }
            }
            Action::CheckHealth => {
                self.guarded_dispatch(ControlId::CheckHealth, BackendCommand::CheckHealth);
            }
            Action::PerformanceTest => {
                self.guarded_dispatch(
                    ControlId::PerformanceTest,
                    BackendCommand::RunPerformanceTest,
                );
            }
            Action::ViewAnalytics => self.view_analytics(),
            Action::ExportData => self.export_session_data(),
            Action::CopySessionId => self.copy_session_id(),
            Action::ToggleAutoRefresh => self.toggle_auto_refresh(),
            Action::EditAttribute => self.screen.open_attribute_form(),
            // Navigation is resolved inside the screen.
            Action::Quit
            | Action::NavigateUp
            | Action::NavigateDown
            | Action::Select
            | Action::FocusNext
            | Action::Cancel => {}
        }
    }

    /// Acquires the control's busy guard and sends the command. Returns
    /// `false` when the control is already busy; the input is ignored.
    fn guarded_dispatch(&mut self, control: ControlId, command: BackendCommand) -> bool {
        let Some(token) = self.guard.acquire(control) else {
            debug!(%control, "Ignoring input while control is busy");
            return false;
        };
        self.pending.insert(control, token);
        let _ = self.command_tx.send(command);
        true
    }

    fn release(&mut self, control: ControlId) {
        if let Some(token) = self.pending.remove(&control) {
            self.guard.release(token);
        }
    }

    fn submit_attribute(&mut self) {
        let Some((key, value)) = self.screen.validated_form() else {
            self.notifications.warning("Please enter both key and value");
            return;
        };
        self.guarded_dispatch(
            ControlId::SetAttribute,
            BackendCommand::SetAttribute { key, value },
        );
    }

    fn view_analytics(&mut self) {
        let Some(session_id) = self
            .screen
            .snapshot
            .as_ref()
            .map(|s| s.session_id.clone())
        else {
            self.notifications.warning("No session loaded yet");
            return;
        };
        self.guarded_dispatch(
            ControlId::ViewAnalytics,
            BackendCommand::LoadAnalytics { session_id },
        );
    }

    fn export_session_data(&mut self) {
        let Some(snapshot) = self.screen.snapshot.as_ref() else {
            self.notifications.warning("No session loaded yet");
            return;
        };

        let export = SessionExport::new(
            snapshot.session_id.clone(),
            self.config.server_url.clone(),
            USER_AGENT,
        );
        match export.write_to(&self.config.export.effective_directory()) {
            Ok(path) => self
                .notifications
                .success(format!("Session data exported to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Session export failed");
                self.notifications.danger("Failed to export session data");
            }
        }
    }

    fn copy_session_id(&mut self) {
        let Some(session_id) = self
            .screen
            .snapshot
            .as_ref()
            .map(|s| s.session_id.clone())
        else {
            self.notifications.warning("No session loaded yet");
            return;
        };
        match self.clipboard.copy_text(session_id) {
            Ok(()) => self.notifications.success("Copied to clipboard!"),
            Err(e) => {
                warn!(error = %e, "Clipboard copy failed");
                self.notifications.danger("Failed to copy to clipboard");
            }
        }
    }

    fn toggle_auto_refresh(&mut self) {
        if self.auto_refresh.is_running() {
            if self.auto_refresh.stop() {
                self.notifications.info("Auto-refresh disabled");
            }
        } else {
            self.start_auto_refresh();
        }
    }

    fn start_auto_refresh(&mut self) {
        let interval_seconds = self.config.refresh.interval_seconds;
        let tick_tx = self.tick_tx.clone();
        self.auto_refresh
            .start(Duration::from_secs(interval_seconds), move |generation| {
                let _ = tick_tx.send(generation);
            });
        self.notifications
            .info(format!("Auto-refresh enabled ({interval_seconds}s)"));
    }

    fn handle_auto_refresh_tick(&mut self, generation: u64) {
        if !self.auto_refresh.accepts(generation) {
            debug!(generation, "Discarding tick from cancelled schedule");
            return;
        }
        debug!("Auto-refreshing session data");
        let _ = self.command_tx.send(BackendCommand::LoadSnapshot {
            origin: SnapshotOrigin::Auto,
        });
    }

    /// Schedules the post-success snapshot reload that makes server-side
    /// state changes visible.
    fn schedule_reload(&self) {
        let command_tx = self.command_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(RELOAD_DELAY).await;
            let _ = command_tx.send(BackendCommand::LoadSnapshot {
                origin: SnapshotOrigin::Scheduled,
            });
        });
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::SnapshotLoaded {
                origin,
                session,
                info,
            } => {
                if origin == SnapshotOrigin::Manual {
                    self.release(ControlId::Refresh);
                }
                self.screen.snapshot = Some(*session);
                if info.is_some() {
                    self.screen.server_info = info;
                }
            }
            UiAction::SnapshotLoadFailed { origin } => {
                if origin == SnapshotOrigin::Manual {
                    self.release(ControlId::Refresh);
                    self.notifications.danger("Failed to refresh session data");
                }
            }
            UiAction::HealthChecked(health) => {
                self.release(ControlId::CheckHealth);
                self.notify_health(&health);
                self.schedule_reload();
            }
            UiAction::HealthCheckFailed => {
                self.release(ControlId::CheckHealth);
                self.notifications.danger("Failed to test Redis health");
            }
            UiAction::PerformanceTested(ack) => {
                self.release(ControlId::PerformanceTest);
                self.notify_performance(&ack);
                self.schedule_reload();
            }
            UiAction::PerformanceTestFailed => {
                self.release(ControlId::PerformanceTest);
                self.notifications
                    .danger("Failed to run performance test");
            }
            UiAction::AttributeSet { key, ack } => {
                self.release(ControlId::SetAttribute);
                if ack.success {
                    self.notifications
                        .success(format!("Attribute '{key}' set successfully!"));
                    self.screen.close_attribute_form();
                    self.schedule_reload();
                } else {
                    self.notifications.warning("Failed to set attribute");
                }
            }
            UiAction::AttributeSetFailed => {
                self.release(ControlId::SetAttribute);
                self.notifications
                    .danger("Error setting session attribute");
            }
            UiAction::AnalyticsLoaded(analytics) => {
                self.release(ControlId::ViewAnalytics);
                if analytics.get("error").is_some() {
                    self.notifications.info("No analytics data available");
                } else {
                    let body = serde_json::to_string_pretty(&analytics)
                        .unwrap_or_else(|_| analytics.to_string());
                    self.screen.open_analytics(body);
                    self.notifications.info("Analytics opened");
                }
            }
            UiAction::AnalyticsLoadFailed => {
                self.release(ControlId::ViewAnalytics);
                self.notifications
                    .danger("Failed to get session analytics");
            }
        }
    }

    fn notify_health(&mut self, health: &HealthStatus) {
        self.notifications
            .notify(health.severity(), health.summary());
    }

    fn notify_performance(&mut self, ack: &OperationAck) {
        if ack.success {
            self.notifications.success("Performance test passed!");
        } else {
            self.notifications.warning("Performance test failed");
        }
    }

    fn handle_stream_update(&mut self, update: StreamUpdate) {
        match update {
            StreamUpdate::Event(ServerEvent::HealthUpdate { status, connected }) => {
                self.stream_status = StreamStatus::Live;
                let message = format!("Redis health: {status}");
                let severity = HealthStatus::new(connected, status, 0).severity();
                self.notifications.notify(severity, message.clone());
                self.desktop.send("Redis health", &message);
            }
            StreamUpdate::Event(ServerEvent::Unknown { kind }) => {
                self.stream_status = StreamStatus::Live;
                debug!(kind, "Ignoring push update of unknown type");
            }
            StreamUpdate::Closed => {
                // No reconnect: the footer pins the offline marker.
                self.stream_status = StreamStatus::Offline;
                self.stream_rx = None;
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let auto_refresh = match self.auto_refresh.state() {
            AutoRefreshState::Running { interval } => Some(interval.as_secs()),
            AutoRefreshState::Stopped => None,
        };
        let ctx = RenderContext {
            guard: &self.guard,
            theme: &self.theme,
            timestamp_format: &self.config.ui.timestamp_format,
            stream_status: self.stream_status,
            auto_refresh,
            keybinds: &self.footer_binds,
        };
        let area = frame.area();
        self.screen.render(area, frame.buffer_mut(), &ctx);

        if let Some(notification) = self.notifications.current() {
            frame.render_widget(NotificationPopup::new(notification, &self.theme), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;
    use crate::domain::ports::mocks::MockMonitorPort;

    fn app() -> App {
        App::new(
            Arc::new(MockMonitorPort::new()),
            None,
            AppConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_health_check_success_notifies_once() {
        let mut app = app();
        app.handle_invoke(Action::CheckHealth);
        assert!(app.guard.is_busy(ControlId::CheckHealth));
        assert_eq!(app.notifications.len(), 0);

        app.handle_action(UiAction::HealthChecked(HealthStatus::new(true, "UP", 12)));

        assert!(!app.guard.is_busy(ControlId::CheckHealth));
        assert_eq!(app.notifications.len(), 1);
        let n = app.notifications.current().unwrap();
        assert_eq!(n.severity, crate::domain::Severity::Success);
        assert!(n.message.contains("12"));
    }

    #[tokio::test]
    async fn test_health_check_degraded_notifies_warning() {
        let mut app = app();
        app.handle_invoke(Action::CheckHealth);
        app.handle_action(UiAction::HealthChecked(HealthStatus::new(
            false, "DOWN", 500,
        )));

        assert_eq!(app.notifications.len(), 1);
        let n = app.notifications.current().unwrap();
        assert_eq!(n.severity, crate::domain::Severity::Warning);
        assert!(n.message.contains("DOWN"));
    }

    #[tokio::test]
    async fn test_health_check_failure_notifies_once_and_releases() {
        let mut app = app();
        app.handle_invoke(Action::CheckHealth);
        app.handle_action(UiAction::HealthCheckFailed);

        assert!(!app.guard.is_busy(ControlId::CheckHealth));
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(
            app.notifications.current().unwrap().severity,
            crate::domain::Severity::Danger
        );
    }

    #[tokio::test]
    async fn test_busy_control_ignores_repeat_invocations() {
        let mut app = app();
        app.handle_invoke(Action::CheckHealth);
        app.handle_invoke(Action::CheckHealth);

        // Still exactly one pending token, and no extra notifications.
        assert_eq!(app.pending.len(), 1);
        assert_eq!(app.notifications.len(), 0);
    }

    #[tokio::test]
    async fn test_empty_attribute_submit_warns_without_network_call() {
        let mut app = app();
        app.screen.open_attribute_form();
        app.submit_attribute();

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(
            app.notifications.current().unwrap().message,
            "Please enter both key and value"
        );
        assert!(!app.guard.is_busy(ControlId::SetAttribute));
    }

    #[tokio::test]
    async fn test_attribute_semantic_failure_is_warning() {
        let mut app = app();
        let token = app.guard.acquire(ControlId::SetAttribute).unwrap();
        app.pending.insert(ControlId::SetAttribute, token);

        app.handle_action(UiAction::AttributeSet {
            key: "theme".to_string(),
            ack: OperationAck {
                success: false,
                message: None,
            },
        });

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(
            app.notifications.current().unwrap().severity,
            crate::domain::Severity::Warning
        );
    }

    #[tokio::test]
    async fn test_analytics_error_field_means_no_data() {
        let mut app = app();
        app.handle_action(UiAction::AnalyticsLoaded(
            serde_json::json!({"error": "no analytics"}),
        ));

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(
            app.notifications.current().unwrap().message,
            "No analytics data available"
        );
    }

    #[tokio::test]
    async fn test_stream_health_update_feeds_notifier() {
        let mut app = app();
        app.handle_stream_update(StreamUpdate::Event(ServerEvent::HealthUpdate {
            status: "UP".to_string(),
            connected: true,
        }));

        assert_eq!(app.stream_status, StreamStatus::Live);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(
            app.notifications.current().unwrap().severity,
            crate::domain::Severity::Success
        );
    }

    #[tokio::test]
    async fn test_stream_close_pins_offline() {
        let mut app = app();
        app.handle_stream_update(StreamUpdate::Closed);
        assert_eq!(app.stream_status, StreamStatus::Offline);
        assert_eq!(app.notifications.len(), 0);
    }

    #[tokio::test]
    async fn test_toggle_auto_refresh_round_trip() {
        let mut app = app();
        app.toggle_auto_refresh();
        assert!(app.auto_refresh.is_running());
        assert_eq!(app.notifications.len(), 1);

        app.toggle_auto_refresh();
        assert!(!app.auto_refresh.is_running());
        assert_eq!(app.notifications.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_auto_refresh_tick_is_discarded() {
        let mut app = app();
        app.toggle_auto_refresh();
        app.toggle_auto_refresh();

        // Generation 1 belonged to the cancelled schedule.
        app.handle_auto_refresh_tick(1);
        // Nothing dispatched: the backend never ran, so no action arrives.
        assert!(app.action_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_snapshot_failure_is_silent_unless_manual() {
        let mut app = app();
        app.handle_action(UiAction::SnapshotLoadFailed {
            origin: SnapshotOrigin::Auto,
        });
        assert_eq!(app.notifications.len(), 0);

        app.handle_invoke(Action::Refresh);
        assert_eq!(app.notifications.len(), 1); // "Refreshing..."
        app.handle_action(UiAction::SnapshotLoadFailed {
            origin: SnapshotOrigin::Manual,
        });
        assert_eq!(app.notifications.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_monitor_rejects_unset_calls() {
        let monitor = MockMonitorPort::new();
        let result = monitor.redis_health().await;
        assert!(matches!(result, Err(ApiError::Network { .. })));
    }
}
