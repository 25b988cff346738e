//! Monitoring backend HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{HealthStatusDto, OperationResponseDto, ServerInfoDto, SessionResponseDto};
use crate::domain::entities::{CacheServerInfo, HealthStatus, SessionSnapshot};
use crate::domain::errors::ApiError;
use crate::domain::ports::{MonitorPort, OperationAck};

/// User agent the client identifies itself with; also recorded in session
/// exports.
pub const USER_AGENT: &str = concat!("oxidash/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// HTTP client for the session monitoring backend.
///
/// No overall request timeout is set: a response that never arrives hangs
/// the call, matching the backend contract. Only connection establishment
/// is bounded.
pub struct MonitorClient {
    client: Client,
    base_url: String,
}

impl MonitorClient {
    /// Creates a client against the given base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shares the underlying connection pool, e.g. with the event stream
    /// reader.
    #[must_use]
    pub fn http_client(&self) -> Client {
        self.client.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(e: &reqwest::Error) -> ApiError {
        warn!(error = %e, "Request to monitoring backend failed");
        if e.is_timeout() {
            ApiError::network("request timed out")
        } else if e.is_connect() {
            ApiError::network("failed to connect to the monitoring backend")
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response.text().await.unwrap_or_default();
        let message = match status {
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                "backend temporarily unavailable".to_string()
            }
            _ if detail.is_empty() => format!("HTTP {status}"),
            _ => detail,
        };
        Err(ApiError::status(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse backend response");
            ApiError::malformed(e.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        Self::decode(Self::check_status(response).await?).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        Self::decode(Self::check_status(response).await?).await
    }
}

#[async_trait]
impl MonitorPort for MonitorClient {
    async fn fetch_session(&self) -> Result<SessionSnapshot, ApiError> {
        let dto: SessionResponseDto = self.get_json("/api/session").await?;
        Ok(dto.into())
    }

    async fn redis_health(&self) -> Result<HealthStatus, ApiError> {
        let dto: HealthStatusDto = self.get_json("/api/health/redis").await?;
        Ok(dto.into())
    }

    async fn redis_info(&self) -> Result<CacheServerInfo, ApiError> {
        let dto: ServerInfoDto = self.get_json("/api/redis/info").await?;
        Ok(dto.into())
    }

    async fn run_performance_test(&self) -> Result<OperationAck, ApiError> {
        let dto: OperationResponseDto = self.post_json("/api/redis/performance-test").await?;
        Ok(dto.into())
    }

    async fn set_session_attribute(
        &self,
        key: &str,
        value: &str,
    ) -> Result<OperationAck, ApiError> {
        debug!(key, "POST /api/session/attribute");
        let response = self
            .client
            .post(self.url("/api/session/attribute"))
            .form(&[("key", key), ("value", value)])
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        let dto: OperationResponseDto = Self::decode(Self::check_status(response).await?).await?;
        Ok(dto.into())
    }

    async fn session_analytics(&self, session_id: &str) -> Result<serde_json::Value, ApiError> {
        self.get_json(&format!("/api/session/analytics/{session_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let client = MonitorClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/session"), "http://localhost:8080/api/session");
    }
}
