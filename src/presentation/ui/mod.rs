//! UI screens.

mod app;
pub(crate) mod backend;
pub(crate) mod dashboard_screen;
mod notification_popup;

pub use app::App;
pub use backend::{Backend, BackendCommand, SnapshotOrigin, UiAction};
pub use dashboard_screen::{DashboardFocus, DashboardState, ScreenOutcome};
pub use notification_popup::NotificationPopup;
