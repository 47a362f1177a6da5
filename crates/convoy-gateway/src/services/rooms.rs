//! Room session broker: join/leave/roster.
//!
//! Authorization comes from the room's durable membership list, re-read at
//! request time. Transport grouping is what actually scopes broadcasts; the
//! durable `current_room` field is only a denormalized roster hint and is
//! written best-effort (a failed write never fails the join).

use std::sync::Arc;

use convoy_core::error::{ConvoyError, Result};
use convoy_core::model::{now_ms, Role};
use convoy_core::protocol::server::{RoomPeer, RoomUser, ServerEvent};

use crate::realtime::{RealtimeCore, SessionCtx};
use crate::store::Store;

pub struct RoomService {
    store: Arc<dyn Store>,
    core: Arc<RealtimeCore>,
}

impl RoomService {
    pub fn new(store: Arc<dyn Store>, core: Arc<RealtimeCore>) -> Self {
        Self { store, core }
    }

    /// Join a room. The caller's `requested_role` is informational only; the
    /// room's recorded role sublists decide the broadcast role.
    pub async fn join(
        &self,
        ctx: &SessionCtx,
        room_id: &str,
        _requested_role: Option<Role>,
    ) -> Result<()> {
        let room = self
            .store
            .get_room(room_id)
            .await?
            .ok_or_else(|| ConvoyError::RoomNotFound(room_id.to_string()))?;

        if !room.is_member(ctx.uid()) {
            return Err(ConvoyError::NotAMember(room_id.to_string()));
        }

        // Connection state may have changed while the room fetch was
        // outstanding; read current_room only now.
        if let Some(prev) = self.core.registry.current_room(ctx.conn_id()) {
            if prev != room_id {
                self.detach(ctx, &prev, Some("switched_room"))?;
            }
        }

        self.core.grouping.join(room_id, ctx.conn_id());
        self.core
            .registry
            .set_current_room(ctx.conn_id(), Some(room_id.to_string()));

        let peer = RoomPeer {
            uid: ctx.uid().to_string(),
            name: ctx.name().to_string(),
            photo: ctx.photo(),
            role: room.resolve_role(ctx.uid()),
        };
        self.core.publish_room_except(
            room_id,
            ctx.conn_id(),
            &ServerEvent::UserConnectedToRoom {
                user: peer,
                timestamp: now_ms(),
            },
        )?;

        tracing::info!(user = %ctx.uid(), room = %room_id, "joined room");
        self.core.send_to_conn(
            ctx.conn_id(),
            &ServerEvent::JoinedRoom {
                room_id: room_id.to_string(),
                room,
            },
        )?;

        if let Err(e) = self
            .store
            .set_current_room(ctx.uid(), Some(room_id.to_string()))
            .await
        {
            tracing::warn!(user = %ctx.uid(), room = %room_id, error = %e, "current_room mirror failed");
        }
        Ok(())
    }

    /// Leave a room. A mismatch between `room_id` and the connection's
    /// current room is a scoped error, never fatal.
    pub async fn leave(&self, ctx: &SessionCtx, room_id: &str) -> Result<()> {
        match self.core.registry.current_room(ctx.conn_id()) {
            Some(cur) if cur == room_id => {}
            _ => {
                return Err(ConvoyError::BadRequest(format!(
                    "not joined to room {room_id}"
                )))
            }
        }

        self.detach(ctx, room_id, None)?;

        tracing::info!(user = %ctx.uid(), room = %room_id, "left room");
        self.core.send_to_conn(
            ctx.conn_id(),
            &ServerEvent::LeftRoom {
                room_id: room_id.to_string(),
            },
        )?;

        if let Err(e) = self.store.set_current_room(ctx.uid(), None).await {
            tracing::warn!(user = %ctx.uid(), error = %e, "current_room clear failed");
        }
        Ok(())
    }

    /// On-demand roster: durable users whose current-room hint matches.
    /// Intentionally independent of transport grouping.
    pub async fn roster(&self, ctx: &SessionCtx, room_id: &str) -> Result<()> {
        let users = self
            .store
            .users_in_room(room_id)
            .await?
            .into_iter()
            .map(|u| RoomUser {
                uid: u.uid,
                display_name: u.display_name,
                photo_url: u.photo_url,
                is_online: u.is_online,
                last_seen: u.last_seen,
            })
            .collect();

        self.core.send_to_conn(
            ctx.conn_id(),
            &ServerEvent::RoomUsers {
                room_id: room_id.to_string(),
                users,
            },
        )
    }

    /// Ungroup and notify the remaining connections with a disconnect-style
    /// notice.
    fn detach(&self, ctx: &SessionCtx, room_id: &str, reason: Option<&str>) -> Result<()> {
        self.core.grouping.leave(room_id, ctx.conn_id());
        self.core.registry.set_current_room(ctx.conn_id(), None);
        self.core.publish_room(
            room_id,
            &ServerEvent::UserDisconnectedFromRoom {
                user_id: ctx.uid().to_string(),
                user_name: ctx.name().to_string(),
                reason: reason.map(str::to_string),
                timestamp: now_ms(),
            },
        )
    }
}
