//! Desktop notification mirror.

use crate::domain::ports::NotificationPort;

/// Mirrors health alerts to the desktop when built with the `notify`
/// feature; compiles to a no-op otherwise.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotificationService {
    enabled: bool,
}

impl DesktopNotificationService {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl NotificationPort for DesktopNotificationService {
    #[cfg(feature = "notify")]
    fn send(&self, title: &str, body: &str) {
        if !self.enabled {
            return;
        }

        let title = title.to_string();
        let body = body.to_string();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = notify_rust::Notification::new()
                .summary(&title)
                .body(&body)
                .appname("Oxidash")
                .show()
            {
                tracing::warn!("Failed to show desktop notification: {}", e);
            }
        });
    }

    #[cfg(not(feature = "notify"))]
    fn send(&self, _title: &str, _body: &str) {
        let _ = self.enabled;
    }
}
