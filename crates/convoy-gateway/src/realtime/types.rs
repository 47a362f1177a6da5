use axum::extract::ws::Message;

use convoy_core::error::Result;
use convoy_core::protocol::ServerEvent;

/// Event serialized once and shared across a broadcast (serialize once,
/// send N times).
#[derive(Debug, Clone)]
pub struct PreparedEvent(String);

impl PreparedEvent {
    pub fn prepare(ev: &ServerEvent) -> Result<Self> {
        Ok(Self(ev.encode()?))
    }

    /// Convert to an axum WS message for transport.
    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.0.clone())
    }
}
