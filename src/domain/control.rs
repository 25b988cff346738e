/// Identifies a dashboard control that can be marked busy while an
/// asynchronous operation it triggered is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Refresh,
    CheckHealth,
    PerformanceTest,
    SetAttribute,
    ViewAnalytics,
    ExportData,
    CopySessionId,
    ToggleAutoRefresh,
}

impl ControlId {
    /// All controls in the order they appear in the actions panel.
    pub const ALL: [Self; 8] = [
        Self::Refresh,
        Self::CheckHealth,
        Self::PerformanceTest,
        Self::SetAttribute,
        Self::ViewAnalytics,
        Self::ExportData,
        Self::CopySessionId,
        Self::ToggleAutoRefresh,
    ];

    /// Resting label for the control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Refresh => "Refresh session data",
            Self::CheckHealth => "Check Redis health",
            Self::PerformanceTest => "Run performance test",
            Self::SetAttribute => "Set session attribute",
            Self::ViewAnalytics => "View session analytics",
            Self::ExportData => "Export session data",
            Self::CopySessionId => "Copy session id",
            Self::ToggleAutoRefresh => "Toggle auto-refresh",
        }
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
