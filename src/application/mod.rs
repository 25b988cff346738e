//! Application layer with dashboard services.

/// Service implementations.
pub mod services;

pub use services::{
    AutoRefresh, AutoRefreshState, BusyGuard, BusyToken, ExportError, NotificationCenter,
    SessionExport,
};
