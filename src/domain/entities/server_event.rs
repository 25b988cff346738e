/// A push update received over the server's event stream.
///
/// Only health changes carry structure the dashboard reacts to; anything
/// else is kept around for the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    HealthUpdate { status: String, connected: bool },
    Unknown { kind: String },
}

impl ServerEvent {
    /// Type tag the wire format uses for health changes.
    pub const HEALTH_UPDATE: &'static str = "health_update";
}
