//! Monitoring backend adapters.

mod client;
mod dto;
mod events;

pub use client::{MonitorClient, USER_AGENT};
pub use events::{EventStreamClient, SseParser, StreamUpdate};
