use async_trait::async_trait;

use crate::domain::entities::{CacheServerInfo, HealthStatus, SessionSnapshot};
use crate::domain::errors::ApiError;

/// Acknowledgement of a write-style operation, carrying the backend's
/// semantic success flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationAck {
    pub success: bool,
    pub message: Option<String>,
}

/// Port for the session/cache monitoring backend.
#[async_trait]
pub trait MonitorPort: Send + Sync {
    /// Fetches the full session snapshot that drives the dashboard.
    async fn fetch_session(&self) -> Result<SessionSnapshot, ApiError>;

    /// Probes cache health via the backend.
    async fn redis_health(&self) -> Result<HealthStatus, ApiError>;

    /// Fetches server-side cache statistics.
    async fn redis_info(&self) -> Result<CacheServerInfo, ApiError>;

    /// Runs the backend's write/read performance test.
    async fn run_performance_test(&self) -> Result<OperationAck, ApiError>;

    /// Stores a session attribute.
    async fn set_session_attribute(&self, key: &str, value: &str)
    -> Result<OperationAck, ApiError>;

    /// Fetches raw analytics for a session. An `error` field in the
    /// returned object signals "no data", not a failure.
    async fn session_analytics(&self, session_id: &str) -> Result<serde_json::Value, ApiError>;
}

#[cfg(test)]
#[allow(dead_code, missing_docs)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Hand-rolled mock with one canned result per operation; each result
    /// is consumed on first call. Unset operations fail with a network
    /// error so tests exercising one path never silently pass another.
    #[derive(Default)]
    pub struct MockMonitorPort {
        pub session: Mutex<Option<Result<SessionSnapshot, ApiError>>>,
        pub health: Mutex<Option<Result<HealthStatus, ApiError>>>,
        pub info: Mutex<Option<Result<CacheServerInfo, ApiError>>>,
        pub performance: Mutex<Option<Result<OperationAck, ApiError>>>,
        pub attribute: Mutex<Option<Result<OperationAck, ApiError>>>,
        pub analytics: Mutex<Option<Result<serde_json::Value, ApiError>>>,
        pub attribute_calls: Mutex<Vec<(String, String)>>,
    }

    impl MockMonitorPort {
        pub fn new() -> Self {
            Self::default()
        }

        fn take<T>(slot: &Mutex<Option<Result<T, ApiError>>>) -> Result<T, ApiError> {
            slot.lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ApiError::network("no canned response")))
        }
    }

    #[async_trait]
    impl MonitorPort for MockMonitorPort {
        async fn fetch_session(&self) -> Result<SessionSnapshot, ApiError> {
            Self::take(&self.session)
        }

        async fn redis_health(&self) -> Result<HealthStatus, ApiError> {
            Self::take(&self.health)
        }

        async fn redis_info(&self) -> Result<CacheServerInfo, ApiError> {
            Self::take(&self.info)
        }

        async fn run_performance_test(&self) -> Result<OperationAck, ApiError> {
            Self::take(&self.performance)
        }

        async fn set_session_attribute(
            &self,
            key: &str,
            value: &str,
        ) -> Result<OperationAck, ApiError> {
            self.attribute_calls
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string()));
            Self::take(&self.attribute)
        }

        async fn session_analytics(
            &self,
            _session_id: &str,
        ) -> Result<serde_json::Value, ApiError> {
            Self::take(&self.analytics)
        }
    }
}
