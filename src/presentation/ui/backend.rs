use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{CacheServerInfo, HealthStatus, SessionSnapshot};
use crate::domain::ports::{MonitorPort, OperationAck};

/// What triggered a snapshot load. Only manual loads hold a busy guard
/// and produce notifications; timer-driven ones stay silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Manual,
    Scheduled,
    Auto,
}

#[derive(Debug)]
pub enum BackendCommand {
    LoadSnapshot { origin: SnapshotOrigin },
    CheckHealth,
    RunPerformanceTest,
    SetAttribute { key: String, value: String },
    LoadAnalytics { session_id: String },
}

/// Completion messages back to the UI loop. Failure variants carry no
/// error detail on purpose: diagnostics go to the log, the user gets a
/// generic message.
#[derive(Debug)]
pub enum UiAction {
    SnapshotLoaded {
        origin: SnapshotOrigin,
        session: Box<SessionSnapshot>,
        info: Option<CacheServerInfo>,
    },
    SnapshotLoadFailed {
        origin: SnapshotOrigin,
    },
    HealthChecked(HealthStatus),
    HealthCheckFailed,
    PerformanceTested(OperationAck),
    PerformanceTestFailed,
    AttributeSet {
        key: String,
        ack: OperationAck,
    },
    AttributeSetFailed,
    AnalyticsLoaded(serde_json::Value),
    AnalyticsLoadFailed,
}

/// Worker that turns UI commands into backend calls and calls into
/// completion messages. One command is processed at a time; the UI keeps
/// per-control guards so distinct controls can have work in flight
/// without interfering.
pub struct Backend {
    monitor: Arc<dyn MonitorPort>,
    command_rx: mpsc::UnboundedReceiver<BackendCommand>,
    action_tx: mpsc::UnboundedSender<UiAction>,
}

impl Backend {
    pub fn new(
        monitor: Arc<dyn MonitorPort>,
        command_rx: mpsc::UnboundedReceiver<BackendCommand>,
        action_tx: mpsc::UnboundedSender<UiAction>,
    ) -> Self {
        Self {
            monitor,
            command_rx,
            action_tx,
        }
    }

    pub async fn run(mut self) {
        info!("Backend worker started");
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command).await;
        }
        info!("Backend worker stopped");
    }

    async fn handle_command(&self, command: BackendCommand) {
        match command {
            BackendCommand::LoadSnapshot { origin } => {
                let (session_result, info_result) =
                    tokio::join!(self.monitor.fetch_session(), self.monitor.redis_info());

                let info = match info_result {
                    Ok(info) => Some(info),
                    Err(e) => {
                        warn!(error = %e, "Failed to load server info");
                        None
                    }
                };

                match session_result {
                    Ok(session) => {
                        debug!(session_id = %session.short_id(), "Session snapshot loaded");
                        let _ = self.action_tx.send(UiAction::SnapshotLoaded {
                            origin,
                            session: Box::new(session),
                            info,
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to load session snapshot");
                        let _ = self.action_tx.send(UiAction::SnapshotLoadFailed { origin });
                    }
                }
            }
            BackendCommand::CheckHealth => match self.monitor.redis_health().await {
                Ok(health) => {
                    debug!(connected = health.connected, status = %health.status, "Health check complete");
                    let _ = self.action_tx.send(UiAction::HealthChecked(health));
                }
                Err(e) => {
                    error!(error = %e, "Redis health test error");
                    let _ = self.action_tx.send(UiAction::HealthCheckFailed);
                }
            },
            BackendCommand::RunPerformanceTest => {
                match self.monitor.run_performance_test().await {
                    Ok(ack) => {
                        debug!(success = ack.success, "Performance test complete");
                        let _ = self.action_tx.send(UiAction::PerformanceTested(ack));
                    }
                    Err(e) => {
                        error!(error = %e, "Performance test error");
                        let _ = self.action_tx.send(UiAction::PerformanceTestFailed);
                    }
                }
            }
            BackendCommand::SetAttribute { key, value } => {
                match self.monitor.set_session_attribute(&key, &value).await {
                    Ok(ack) => {
                        debug!(key = %key, accepted = ack.success, "Attribute stored");
                        let _ = self.action_tx.send(UiAction::AttributeSet { key, ack });
                    }
                    Err(e) => {
                        error!(error = %e, "Set attribute error");
                        let _ = self.action_tx.send(UiAction::AttributeSetFailed);
                    }
                }
            }
            BackendCommand::LoadAnalytics { session_id } => {
                match self.monitor.session_analytics(&session_id).await {
                    Ok(analytics) => {
                        let _ = self.action_tx.send(UiAction::AnalyticsLoaded(analytics));
                    }
                    Err(e) => {
                        error!(error = %e, "Analytics error");
                        let _ = self.action_tx.send(UiAction::AnalyticsLoadFailed);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;
    use crate::domain::ports::mocks::MockMonitorPort;

    fn harness() -> (
        Arc<MockMonitorPort>,
        mpsc::UnboundedSender<BackendCommand>,
        mpsc::UnboundedReceiver<UiAction>,
        tokio::task::JoinHandle<()>,
    ) {
        let monitor = Arc::new(MockMonitorPort::new());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let backend = Backend::new(monitor.clone(), command_rx, action_tx);
        let handle = tokio::spawn(backend.run());
        (monitor, command_tx, action_rx, handle)
    }

    #[tokio::test]
    async fn test_health_check_success_round_trip() {
        let (monitor, command_tx, mut action_rx, _handle) = harness();
        *monitor.health.lock().unwrap() = Some(Ok(HealthStatus::new(true, "UP", 12)));

        command_tx.send(BackendCommand::CheckHealth).unwrap();

        match action_rx.recv().await.unwrap() {
            UiAction::HealthChecked(health) => {
                assert!(health.connected);
                assert_eq!(health.response_time_ms, 12);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health_check_transport_failure() {
        let (monitor, command_tx, mut action_rx, _handle) = harness();
        *monitor.health.lock().unwrap() = Some(Err(ApiError::network("connection refused")));

        command_tx.send(BackendCommand::CheckHealth).unwrap();

        assert!(matches!(
            action_rx.recv().await.unwrap(),
            UiAction::HealthCheckFailed
        ));
    }

    #[tokio::test]
    async fn test_set_attribute_forwards_key_and_value() {
        let (monitor, command_tx, mut action_rx, _handle) = harness();
        *monitor.attribute.lock().unwrap() = Some(Ok(OperationAck {
            success: true,
            message: None,
        }));

        command_tx
            .send(BackendCommand::SetAttribute {
                key: "theme".to_string(),
                value: "dark".to_string(),
            })
            .unwrap();

        match action_rx.recv().await.unwrap() {
            UiAction::AttributeSet { key, ack } => {
                assert_eq!(key, "theme");
                assert!(ack.success);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(
            monitor.attribute_calls.lock().unwrap().as_slice(),
            &[("theme".to_string(), "dark".to_string())]
        );
    }

    #[tokio::test]
    async fn test_snapshot_load_tolerates_missing_server_info() {
        let (monitor, command_tx, mut action_rx, _handle) = harness();
        let session = SessionSnapshot {
            session_id: "abcdef1234567890".to_string(),
            user_id: "u-1".to_string(),
            is_new: false,
            creation_time: chrono::Utc::now(),
            last_accessed_time: chrono::Utc::now(),
            request_count: 1,
            container_info: "local".to_string(),
            region: "us-east-1".to_string(),
            custom_attributes: std::collections::BTreeMap::new(),
            redis_health: HealthStatus::new(true, "UP", 2),
            performance: crate::domain::entities::PerformanceMetrics::default(),
        };
        *monitor.session.lock().unwrap() = Some(Ok(session));
        *monitor.info.lock().unwrap() = Some(Err(ApiError::status(503, "unavailable")));

        command_tx
            .send(BackendCommand::LoadSnapshot {
                origin: SnapshotOrigin::Manual,
            })
            .unwrap();

        match action_rx.recv().await.unwrap() {
            UiAction::SnapshotLoaded {
                origin,
                session,
                info,
            } => {
                assert_eq!(origin, SnapshotOrigin::Manual);
                assert_eq!(session.short_id(), "abcdef12");
                assert!(info.is_none());
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
