//! Event dispatcher.
//!
//! Routes decoded client events to the room broker, message relay, and
//! presence synchronizer. Every service error is scoped to the offending
//! event: it becomes one `error` event back to the originating connection
//! and never tears down the session or touches other connections.

use std::sync::Arc;

use convoy_core::model::now_ms;
use convoy_core::protocol::{ClientEvent, ServerEvent};

use crate::realtime::{ConnEntry, RealtimeCore, SessionCtx};
use crate::services::{MessageService, PresenceService, RoomService};
use crate::store::Store;

pub struct Dispatcher {
    rooms: RoomService,
    messages: MessageService,
    presence: PresenceService,
    core: Arc<RealtimeCore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn Store>, core: Arc<RealtimeCore>) -> Self {
        Self {
            rooms: RoomService::new(Arc::clone(&store), Arc::clone(&core)),
            messages: MessageService::new(Arc::clone(&store), Arc::clone(&core)),
            presence: PresenceService::new(store, Arc::clone(&core)),
            core,
        }
    }

    /// Handle one inbound event for an authenticated connection.
    pub async fn dispatch(&self, ctx: &SessionCtx, ev: ClientEvent) {
        let result = match ev {
            ClientEvent::JoinRoom { room_id, role } => {
                self.rooms.join(ctx, &room_id, role).await
            }
            ClientEvent::LeaveRoom { room_id } => self.rooms.leave(ctx, &room_id).await,
            ClientEvent::SendMessage {
                room_id,
                content,
                kind,
            } => self.messages.send(ctx, &room_id, &content, kind).await,
            ClientEvent::UpdateLocation {
                latitude,
                longitude,
                accuracy,
            } => {
                self.presence
                    .update_location(ctx, latitude, longitude, accuracy)
                    .await
            }
            ClientEvent::TypingStart { room_id } => self.messages.typing(ctx, &room_id, true),
            ClientEvent::TypingStop { room_id } => self.messages.typing(ctx, &room_id, false),
            ClientEvent::GetRoomUsers { room_id } => self.rooms.roster(ctx, &room_id).await,
            ClientEvent::Ping => self
                .core
                .send_to_conn(ctx.conn_id(), &ServerEvent::Pong { timestamp: now_ms() }),
        };

        if let Err(err) = result {
            tracing::debug!(user = %ctx.uid(), error = %err, "event rejected");
            let _ = self
                .core
                .send_to_conn(ctx.conn_id(), &ServerEvent::from_error(&err));
        }
    }

    /// Post-registration hook (presence mirror + ack handled by transport).
    pub async fn on_connect(&self, ctx: &SessionCtx) {
        self.presence.mark_connected(ctx).await;
    }

    /// Transport-close hook, any reason.
    pub async fn on_disconnect(&self, ctx: &SessionCtx, entry: ConnEntry, reason: &str) {
        self.presence.mark_disconnected(ctx, entry, reason).await;
    }
}
