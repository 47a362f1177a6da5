use std::sync::Arc;

use convoy_core::error::{ConvoyError, Result};
use convoy_core::protocol::ServerEvent;

use crate::auth::Identity;
use crate::realtime::core::{ConnectionRegistry, RoomGrouping};
use crate::realtime::types::PreparedEvent;

/// RealtimeCore: registry + grouping + fan-out.
///
/// Delivery is at-most-once: broadcasts use `try_send` into each session's
/// outbound queue and drop the frame if the queue is full. The store append
/// is the durability boundary, not transport delivery.
pub struct RealtimeCore {
    pub registry: Arc<ConnectionRegistry>,
    pub grouping: Arc<RoomGrouping>,
}

impl RealtimeCore {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            grouping: Arc::new(RoomGrouping::new()),
        }
    }

    /// Direct send to one connection (ack path).
    pub fn send_to_conn(&self, conn_id: &str, ev: &ServerEvent) -> Result<()> {
        let handle = self
            .registry
            .handle(conn_id)
            .ok_or_else(|| ConvoyError::Internal(format!("connection gone: {conn_id}")))?;
        let prepared = PreparedEvent::prepare(ev)?;
        let _ = handle.tx.try_send(prepared.to_ws_message());
        Ok(())
    }

    /// Broadcast to every connection grouped under the room.
    pub fn publish_room(&self, room_id: &str, ev: &ServerEvent) -> Result<()> {
        self.fan_out(room_id, None, ev)
    }

    /// Broadcast to every grouped connection except `except_conn` (presence
    /// notices and typing indicators go to "the others").
    pub fn publish_room_except(
        &self,
        room_id: &str,
        except_conn: &str,
        ev: &ServerEvent,
    ) -> Result<()> {
        self.fan_out(room_id, Some(except_conn), ev)
    }

    fn fan_out(&self, room_id: &str, except: Option<&str>, ev: &ServerEvent) -> Result<()> {
        let prepared = PreparedEvent::prepare(ev)?;
        for conn_id in self.grouping.members(room_id) {
            if except == Some(conn_id.as_str()) {
                continue;
            }
            // A connection that unregistered between the member snapshot and
            // here simply has no handle anymore; skip it.
            if let Some(handle) = self.registry.handle(&conn_id) {
                let _ = handle.tx.try_send(prepared.to_ws_message());
            }
        }
        Ok(())
    }
}

impl Default for RealtimeCore {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-connection context passed to services: connection id plus the display
/// snapshot resolved at authentication time.
#[derive(Clone)]
pub struct SessionCtx {
    conn_id: Arc<str>,
    uid: Arc<str>,
    name: Arc<str>,
    photo: Option<Arc<str>>,
}

impl SessionCtx {
    pub fn new(conn_id: impl Into<Arc<str>>, identity: &Identity, name: String) -> Self {
        Self {
            conn_id: conn_id.into(),
            uid: Arc::from(identity.uid.as_str()),
            name: Arc::from(name.as_str()),
            photo: identity.photo.as_deref().map(Arc::from),
        }
    }

    pub fn conn_id(&self) -> &str {
        &self.conn_id
    }
    pub fn uid(&self) -> &str {
        &self.uid
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn photo(&self) -> Option<String> {
        self.photo.as_deref().map(str::to_string)
    }
}
