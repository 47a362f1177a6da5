//! Message relay: validated chat fan-out plus best-effort typing indicators.

use std::sync::Arc;

use convoy_core::error::{ConvoyError, Result};
use convoy_core::model::{Message, MessageKind};
use convoy_core::protocol::ServerEvent;

use crate::realtime::{RealtimeCore, SessionCtx};
use crate::store::Store;

pub struct MessageService {
    store: Arc<dyn Store>,
    core: Arc<RealtimeCore>,
}

impl MessageService {
    pub fn new(store: Arc<dyn Store>, core: Arc<RealtimeCore>) -> Self {
        Self { store, core }
    }

    /// Append a message durably, then broadcast it to every connection
    /// grouped under the room, including the sender's other devices.
    ///
    /// Membership is checked against the room snapshot fetched *in this
    /// call*, not against anything cached at join time: membership may have
    /// changed since. A store failure on the append is surfaced to the
    /// sender and the broadcast is skipped; clients must never see a
    /// message that was not durably appended.
    pub async fn send(
        &self,
        ctx: &SessionCtx,
        room_id: &str,
        content: &str,
        kind: Option<MessageKind>,
    ) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ConvoyError::EmptyContent);
        }

        let room = self
            .store
            .get_room(room_id)
            .await?
            .ok_or_else(|| ConvoyError::RoomNotFound(room_id.to_string()))?;
        if !room.is_member(ctx.uid()) {
            return Err(ConvoyError::NotAMember(room_id.to_string()));
        }

        let message = Message::new(
            ctx.uid(),
            ctx.name(),
            ctx.photo(),
            content,
            kind.unwrap_or_default(),
        );
        let message = self.store.append_message(room_id, message).await?;

        tracing::debug!(user = %ctx.uid(), room = %room_id, msg = %message.id, "message relayed");
        self.core.publish_room(
            room_id,
            &ServerEvent::NewMessage {
                room_id: room_id.to_string(),
                message,
            },
        )
    }

    /// Typing indicator: pure broadcast, no persistence. The only
    /// precondition is that the sender is transport-grouped under the room.
    pub fn typing(&self, ctx: &SessionCtx, room_id: &str, is_typing: bool) -> Result<()> {
        if !self.core.grouping.contains(room_id, ctx.conn_id()) {
            return Err(ConvoyError::BadRequest(format!(
                "not joined to room {room_id}"
            )));
        }

        self.core.publish_room_except(
            room_id,
            ctx.conn_id(),
            &ServerEvent::UserTyping {
                user_id: ctx.uid().to_string(),
                user_name: ctx.name().to_string(),
                is_typing,
            },
        )
    }
}
