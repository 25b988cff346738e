//! Dashboard services.

mod auto_refresh;
mod busy_guard;
mod notification_center;
mod session_export;

pub use auto_refresh::{AutoRefresh, AutoRefreshState};
pub use busy_guard::{BusyGuard, BusyToken};
pub use notification_center::NotificationCenter;
pub use session_export::{ExportError, SessionExport};
