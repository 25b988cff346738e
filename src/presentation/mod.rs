//! Presentation layer with UI components and event handling.

/// Command registry.
pub mod commands;
/// Event handling.
pub mod events;
/// Theme and color handling.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
