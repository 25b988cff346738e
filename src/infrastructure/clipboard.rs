use thiserror::Error;
use tracing::warn;

/// Errors from the system clipboard.
#[derive(Debug, Error)]
#[error("clipboard unavailable: {message}")]
pub struct ClipboardError {
    message: String,
}

/// Thin wrapper over the system clipboard.
#[derive(Clone, Default)]
pub struct ClipboardService {}

impl ClipboardService {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Places `text` on the system clipboard.
    ///
    /// # Errors
    /// Returns error if the clipboard cannot be opened or written.
    pub fn copy_text(&self, text: impl Into<String>) -> Result<(), ClipboardError> {
        let text = text.into();
        let mut clipboard = arboard::Clipboard::new().map_err(|e| {
            warn!("Failed to initialize clipboard: {}", e);
            ClipboardError {
                message: e.to_string(),
            }
        })?;
        clipboard.set_text(text).map_err(|e| {
            warn!("Failed to set clipboard text: {}", e);
            ClipboardError {
                message: e.to_string(),
            }
        })
    }
}
