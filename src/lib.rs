//! Oxidash - a lightweight terminal dashboard for Redis-backed session stores.
//!
//! This crate provides a terminal client for a session/cache monitoring
//! backend, wiring keyboard actions to REST calls and rendering the results
//! in a TUI with transient notifications.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing dashboard services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "oxidash";
