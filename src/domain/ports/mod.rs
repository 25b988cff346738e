//! Port definitions.

mod monitor_port;
mod notification_port;

pub use monitor_port::{MonitorPort, OperationAck};
pub use notification_port::NotificationPort;

#[cfg(test)]
pub mod mocks {
    pub use super::monitor_port::mock::MockMonitorPort;
    pub use super::notification_port::mock::MockNotificationPort;
}
