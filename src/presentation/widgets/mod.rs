//! Reusable widgets.

mod actions_panel;
mod analytics_view;
mod attribute_form;
mod footer_bar;
mod header_bar;
mod health_panel;
mod info_panel;
mod session_panel;

pub use actions_panel::ActionsPanel;
pub use analytics_view::AnalyticsView;
pub use attribute_form::{AttributeForm, FormOutcome};
pub use footer_bar::{FooterBar, StreamStatus, format_key};
pub use header_bar::HeaderBar;
pub use health_panel::HealthPanel;
pub use info_panel::InfoPanel;
pub use session_panel::SessionPanel;
