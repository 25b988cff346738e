//! Server-sent event stream reader.

use futures_util::StreamExt;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::dto::EventDto;
use crate::domain::entities::ServerEvent;

const EVENTS_PATH: &str = "/api/events";

/// Message from the stream reader to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamUpdate {
    /// A parsed push update.
    Event(ServerEvent),
    /// The subscription ended, by error or server close. No reconnect is
    /// attempted; the UI pins an offline indicator.
    Closed,
}

/// Incremental parser for the `text/event-stream` framing: accumulates
/// `data:` lines and emits one payload per blank-line dispatch.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
    data: String,
}

impl SseParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk of the response body, returning any event payloads it
    /// completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if !self.data.is_empty() {
                    payloads.push(std::mem::take(&mut self.data));
                }
            } else if let Some(value) = line.strip_prefix("data:") {
                if !self.data.is_empty() {
                    self.data.push('\n');
                }
                self.data.push_str(value.strip_prefix(' ').unwrap_or(value));
            }
            // comment lines (":...") and other fields are ignored
        }
        payloads
    }
}

/// Best-effort subscription to the backend's push channel.
///
/// Fire-and-forget relative to the rest of the UI: it owns no shared
/// state, and every outcome is reported over the channel.
pub struct EventStreamClient {
    client: Client,
    base_url: String,
}

impl EventStreamClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Spawns the reader task.
    pub fn spawn(self, tx: mpsc::UnboundedSender<StreamUpdate>) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.subscribe(&tx).await {
                warn!(error = %e, "Event stream ended");
            }
            let _ = tx.send(StreamUpdate::Closed);
        })
    }

    async fn subscribe(
        &self,
        tx: &mpsc::UnboundedSender<StreamUpdate>,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}{EVENTS_PATH}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;

        info!(url = %url, "Event stream connected");

        let mut body = response.bytes_stream();
        let mut parser = SseParser::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for payload in parser.push(&chunk) {
                match serde_json::from_str::<EventDto>(&payload) {
                    Ok(dto) => {
                        let event = ServerEvent::from(dto);
                        debug!(?event, "Push update received");
                        if tx.send(StreamUpdate::Event(event)).is_err() {
                            return Ok(());
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, payload, "Discarding unparseable push update");
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_emits_payload_on_blank_line() {
        let mut parser = SseParser::new();
        let payloads = parser.push(b"data: {\"type\":\"health_update\"}\n\n");
        assert_eq!(payloads, vec!["{\"type\":\"health_update\"}".to_string()]);
    }

    #[test]
    fn test_parser_handles_split_chunks() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"data: {\"type\":").is_empty());
        assert!(parser.push(b"\"health_update\"}").is_empty());
        let payloads = parser.push(b"\n\n");
        assert_eq!(payloads, vec!["{\"type\":\"health_update\"}".to_string()]);
    }

    #[test]
    fn test_parser_joins_multiline_data() {
        let mut parser = SseParser::new();
        let payloads = parser.push(b"data: line1\ndata: line2\n\n");
        assert_eq!(payloads, vec!["line1\nline2".to_string()]);
    }

    #[test]
    fn test_parser_ignores_comments_and_other_fields() {
        let mut parser = SseParser::new();
        let payloads = parser.push(b": keepalive\nevent: update\ndata: {}\n\n");
        assert_eq!(payloads, vec!["{}".to_string()]);
    }

    #[test]
    fn test_parser_skips_empty_dispatch() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"\n\n\n").is_empty());
    }
}
