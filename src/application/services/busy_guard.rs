use std::collections::HashMap;

use crate::domain::ControlId;

const BUSY_LABEL: &str = "Working...";

/// Opaque handle pairing an `acquire` with its `release`.
///
/// Holds the label captured at acquire time; the guard will only restore a
/// control through the token minted for it.
#[derive(Debug)]
pub struct BusyToken {
    control: ControlId,
    original_label: String,
}

impl BusyToken {
    #[must_use]
    pub const fn control(&self) -> ControlId {
        self.control
    }
}

/// Tracks which dashboard controls are busy and what their labels were.
///
/// A control may not be acquired twice without an intervening release;
/// every acquire must be paired with exactly one release, including on the
/// failure path of the guarded operation.
#[derive(Debug)]
pub struct BusyGuard {
    labels: HashMap<ControlId, String>,
}

impl Default for BusyGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyGuard {
    #[must_use]
    pub fn new() -> Self {
        let labels = ControlId::ALL
            .into_iter()
            .map(|control| (control, control.label().to_string()))
            .collect();
        Self { labels }
    }

    /// Captures the control's current label, swaps in the busy indicator,
    /// and returns the token needed to release it. Returns `None` when the
    /// control is already busy; the caller must ignore the triggering
    /// input in that case.
    pub fn acquire(&mut self, control: ControlId) -> Option<BusyToken> {
        let label = self.labels.get_mut(&control)?;
        if label == BUSY_LABEL {
            return None;
        }
        let original_label = std::mem::replace(label, BUSY_LABEL.to_string());
        Some(BusyToken {
            control,
            original_label,
        })
    }

    /// Restores the original label and re-enables the control.
    pub fn release(&mut self, token: BusyToken) {
        self.labels.insert(token.control, token.original_label);
    }

    #[must_use]
    pub fn label(&self, control: ControlId) -> &str {
        self.labels
            .get(&control)
            .map_or_else(|| control.label(), String::as_str)
    }

    #[must_use]
    pub fn is_busy(&self, control: ControlId) -> bool {
        self.labels.get(&control).is_some_and(|l| l == BUSY_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release_round_trip() {
        let mut guard = BusyGuard::new();
        let original = guard.label(ControlId::CheckHealth).to_string();

        let token = guard.acquire(ControlId::CheckHealth).unwrap();
        assert!(guard.is_busy(ControlId::CheckHealth));
        assert_eq!(guard.label(ControlId::CheckHealth), BUSY_LABEL);

        guard.release(token);
        assert!(!guard.is_busy(ControlId::CheckHealth));
        assert_eq!(guard.label(ControlId::CheckHealth), original);
    }

    #[test]
    fn test_reentrant_acquire_is_rejected() {
        let mut guard = BusyGuard::new();
        let token = guard.acquire(ControlId::PerformanceTest).unwrap();
        assert!(guard.acquire(ControlId::PerformanceTest).is_none());
        guard.release(token);
        assert!(guard.acquire(ControlId::PerformanceTest).is_some());
    }

    #[test]
    fn test_controls_are_independent() {
        let mut guard = BusyGuard::new();
        let _token = guard.acquire(ControlId::Refresh).unwrap();
        assert!(!guard.is_busy(ControlId::PerformanceTest));
        assert!(guard.acquire(ControlId::PerformanceTest).is_some());
    }
}
