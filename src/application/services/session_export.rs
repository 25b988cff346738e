use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors from writing a session export to disk.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The exported record. Field names match the artifact the original
/// dashboard produced, timestamp in ISO-8601.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub session_id: String,
    #[serde(serialize_with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub user_agent: String,
}

fn iso8601<S: serde::Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl SessionExport {
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// `session-data-<first 8 chars of the session id>.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let end = self
            .session_id
            .char_indices()
            .nth(8)
            .map_or(self.session_id.len(), |(i, _)| i);
        format!("session-data-{}.json", &self.session_id[..end])
    }

    /// Pretty-printed JSON body of the export.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the export into `directory` and returns the full path.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(self.file_name());
        std::fs::write(&path, self.to_json()?)?;
        info!(path = %path.display(), "Session data exported");
        Ok(path)
    }
}
