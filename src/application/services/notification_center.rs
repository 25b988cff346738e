use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, Severity};

/// FIFO queue of transient notifications.
///
/// Overlapping messages queue rather than overwrite each other; the front
/// message starts its display clock when first rendered and is dropped once
/// it expires. Rendering failures never propagate out of here.
#[derive(Debug)]
pub struct NotificationCenter {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationCenter {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        let notification =
            Notification::new(severity, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(Severity::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.notify(Severity::Warning, message);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.notify(Severity::Danger, message);
    }

    /// Advances the queue: starts the front message's display clock and
    /// drops it once expired, promoting the next one.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_notification_flow() {
        let mut center = NotificationCenter::default();

        center.info("Refreshing session data...");
        assert!(center.current().is_some());

        center.tick();
        assert!(center.current().is_some());
    }

    #[test]
    fn test_overlapping_messages_queue_in_order() {
        let mut center = NotificationCenter::default();
        center.success("Attribute 'theme' set successfully!");
        center.warning("Redis is unhealthy: DOWN");

        assert_eq!(center.len(), 2);
        assert_eq!(center.current().unwrap().severity, Severity::Success);

        center.tick();

        center.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());

        center.tick();

        let promoted = center.current().unwrap();
        assert_eq!(promoted.severity, Severity::Warning);
        assert!(promoted.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_tick_on_empty_queue_is_noop() {
        let mut center = NotificationCenter::default();
        center.tick();
        assert!(center.is_empty());
    }
}
