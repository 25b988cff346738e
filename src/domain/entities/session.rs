use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::HealthStatus;

/// Timing data the backend reports alongside each session read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceMetrics {
    pub session_retrieval_time_ms: i64,
    pub session_save_time_ms: i64,
    pub active_connections: i64,
}

/// Full state of the monitored session, as returned by the backend.
///
/// This is the unit of a "full reload": every panel on the dashboard
/// renders from one snapshot, replaced wholesale on refresh.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub user_id: String,
    pub is_new: bool,
    pub creation_time: DateTime<Utc>,
    pub last_accessed_time: DateTime<Utc>,
    pub request_count: u64,
    pub container_info: String,
    pub region: String,
    pub custom_attributes: BTreeMap<String, String>,
    pub redis_health: HealthStatus,
    pub performance: PerformanceMetrics,
}

impl SessionSnapshot {
    /// First eight characters of the session id, used for display and for
    /// the export file name.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let end = self
            .session_id
            .char_indices()
            .nth(8)
            .map_or(self.session_id.len(), |(i, _)| i);
        &self.session_id[..end]
    }
}
