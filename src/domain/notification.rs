use std::time::{Duration, Instant};

/// Visual severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Short label used as the popup title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Danger => "Error",
        }
    }
}

/// A transient status message shown to the user and discarded after a
/// fixed display duration.
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub created_at: Instant,
    pub displayed_at: Option<Instant>,
    pub duration: Duration,
}

impl Notification {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Expiry is measured from the moment the notification was first
    /// rendered, not from creation, so queued messages get a full slot.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(Severity::Success, "Attribute set");
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.message, "Attribute set");
        assert_eq!(n.duration, Duration::from_secs(5));
        assert!(n.displayed_at.is_none());
    }

    #[test]
    fn test_notification_expiry() {
        let mut n = Notification::new(Severity::Info, "Refreshing")
            .with_duration(Duration::from_nanos(1));
        assert!(!n.is_expired());
        n.mark_displayed();
        std::thread::sleep(Duration::from_millis(1));
        assert!(n.is_expired());
    }

    #[test]
    fn test_mark_displayed_is_idempotent() {
        let mut n = Notification::new(Severity::Warning, "Redis is unhealthy");
        n.mark_displayed();
        let first = n.displayed_at;
        n.mark_displayed();
        assert_eq!(n.displayed_at, first);
    }
}
