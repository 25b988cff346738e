//! Wire formats of the monitoring backend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::{
    CacheServerInfo, HealthStatus, PerformanceMetrics, ServerEvent, SessionSnapshot,
};
use crate::domain::ports::OperationAck;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatusDto {
    pub connected: bool,
    pub status: String,
    pub response_time_ms: i64,
}

impl From<HealthStatusDto> for HealthStatus {
    fn from(dto: HealthStatusDto) -> Self {
        Self {
            connected: dto.connected,
            status: dto.status,
            response_time_ms: dto.response_time_ms,
        }
    }
}

/// Body of write-style operations: `{ success, message?, error? }`.
#[derive(Debug, Deserialize)]
pub struct OperationResponseDto {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<OperationResponseDto> for OperationAck {
    fn from(dto: OperationResponseDto) -> Self {
        Self {
            success: dto.success,
            message: dto.message.or(dto.error),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDto {
    #[serde(default)]
    pub session_retrieval_time_ms: i64,
    #[serde(default)]
    pub session_save_time_ms: i64,
    #[serde(default)]
    pub active_connections: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseDto {
    pub session_id: String,
    pub user_id: String,
    #[serde(default)]
    pub is_new: bool,
    pub creation_time: DateTime<Utc>,
    pub last_accessed_time: DateTime<Utc>,
    #[serde(default)]
    pub request_count: u64,
    #[serde(default)]
    pub container_info: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub custom_attributes: BTreeMap<String, Value>,
    pub redis_health: HealthStatusDto,
    #[serde(default)]
    pub performance: PerformanceDto,
}

impl From<SessionResponseDto> for SessionSnapshot {
    fn from(dto: SessionResponseDto) -> Self {
        Self {
            session_id: dto.session_id,
            user_id: dto.user_id,
            is_new: dto.is_new,
            creation_time: dto.creation_time,
            last_accessed_time: dto.last_accessed_time,
            request_count: dto.request_count,
            container_info: dto.container_info,
            region: dto.region,
            custom_attributes: dto
                .custom_attributes
                .into_iter()
                .map(|(key, value)| (key, display_value(&value)))
                .collect(),
            redis_health: dto.redis_health.into(),
            performance: PerformanceMetrics {
                session_retrieval_time_ms: dto.performance.session_retrieval_time_ms,
                session_save_time_ms: dto.performance.session_save_time_ms,
                active_connections: dto.performance.active_connections,
            },
        }
    }
}

/// Keys here are the server's raw INFO property names, all string-valued.
#[derive(Debug, Deserialize)]
pub struct ServerInfoDto {
    #[serde(default = "unknown")]
    pub version: String,
    #[serde(default = "zero")]
    pub uptime: String,
    #[serde(default = "zero")]
    pub connected_clients: String,
    #[serde(default = "zero")]
    pub used_memory: String,
    #[serde(default = "zero")]
    pub total_commands_processed: String,
    #[serde(default = "zero")]
    pub keyspace_hits: String,
    #[serde(default = "zero")]
    pub keyspace_misses: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

fn zero() -> String {
    "0".to_string()
}

impl From<ServerInfoDto> for CacheServerInfo {
    fn from(dto: ServerInfoDto) -> Self {
        Self {
            version: dto.version,
            uptime_seconds: dto.uptime,
            connected_clients: dto.connected_clients,
            used_memory: dto.used_memory,
            total_commands_processed: dto.total_commands_processed,
            keyspace_hits: dto.keyspace_hits,
            keyspace_misses: dto.keyspace_misses,
        }
    }
}

/// A message on the event stream: `{ type, ... }`.
#[derive(Debug, Deserialize)]
pub struct EventDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub connected: Option<bool>,
}

impl From<EventDto> for ServerEvent {
    fn from(dto: EventDto) -> Self {
        if dto.kind == Self::HEALTH_UPDATE {
            Self::HealthUpdate {
                status: dto.status.unwrap_or_default(),
                connected: dto.connected.unwrap_or(false),
            }
        } else {
            Self::Unknown { kind: dto.kind }
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
