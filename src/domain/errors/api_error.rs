//! Monitoring API error types.

use thiserror::Error;

/// Errors surfaced by the monitoring API client.
///
/// The user-facing taxonomy is binary: any of these means "the call itself
/// failed" and is shown as a generic danger message, while semantic flags
/// inside a successful response never become an `ApiError`.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("backend returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("malformed response body: {message}")]
    Malformed { message: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates non-2xx status error.
    #[must_use]
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Creates malformed body error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error was a transport-level failure.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let e = ApiError::status(503, "service unavailable");
        assert!(e.to_string().contains("503"));
        assert!(!e.is_network_error());
        assert!(ApiError::network("refused").is_network_error());
    }
}
