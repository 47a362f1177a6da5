//! Presence synchronizer: mirrors connection lifecycle and location updates
//! into the durable User record.

use std::sync::Arc;

use convoy_core::error::{ConvoyError, Result};
use convoy_core::model::{now_ms, Location};
use convoy_core::protocol::ServerEvent;

use crate::realtime::{ConnEntry, RealtimeCore, SessionCtx};
use crate::store::Store;

pub struct PresenceService {
    store: Arc<dyn Store>,
    core: Arc<RealtimeCore>,
}

impl PresenceService {
    pub fn new(store: Arc<dyn Store>, core: Arc<RealtimeCore>) -> Self {
        Self { store, core }
    }

    /// Mirror a successful registration. Store failure is logged, never
    /// fatal to the connection.
    pub async fn mark_connected(&self, ctx: &SessionCtx) {
        if let Err(e) = self.store.set_online(ctx.uid(), true).await {
            tracing::warn!(user = %ctx.uid(), error = %e, "online mirror failed");
        }
    }

    /// Validate and persist a location update, then broadcast it to the
    /// other connections grouped under the user's current room (per the
    /// durable current-room reference).
    pub async fn update_location(
        &self,
        ctx: &SessionCtx,
        latitude: f64,
        longitude: f64,
        accuracy: Option<f64>,
    ) -> Result<()> {
        if !Location::coordinates_valid(latitude, longitude) {
            return Err(ConvoyError::InvalidCoordinate {
                lat: latitude,
                lng: longitude,
            });
        }

        let location = Location {
            latitude,
            longitude,
            accuracy,
            timestamp: now_ms(),
        };
        self.store.set_location(ctx.uid(), location.clone()).await?;

        let current_room = match self.store.get_user(ctx.uid()).await {
            Ok(user) => user.and_then(|u| u.current_room),
            Err(e) => {
                tracing::warn!(user = %ctx.uid(), error = %e, "user fetch after location write failed");
                None
            }
        };

        if let Some(room_id) = current_room {
            self.core.publish_room_except(
                &room_id,
                ctx.conn_id(),
                &ServerEvent::UserLocationUpdate {
                    user_id: ctx.uid().to_string(),
                    user_name: ctx.name().to_string(),
                    location,
                },
            )?;
        }
        Ok(())
    }

    /// Cleanup after a transport close of any kind. `entry` is the record
    /// removed from the registry; its last-known room receives exactly one
    /// disconnect notice. The online flag goes false only once no other
    /// connection remains for the identity.
    pub async fn mark_disconnected(&self, ctx: &SessionCtx, entry: ConnEntry, reason: &str) {
        if let Some(room_id) = entry.current_room {
            self.core.grouping.leave(&room_id, ctx.conn_id());
            let notice = ServerEvent::UserDisconnectedFromRoom {
                user_id: ctx.uid().to_string(),
                user_name: ctx.name().to_string(),
                reason: Some(reason.to_string()),
                timestamp: now_ms(),
            };
            if let Err(e) = self.core.publish_room(&room_id, &notice) {
                tracing::warn!(room = %room_id, error = %e, "disconnect notice failed");
            }
        }

        if self.core.registry.session_count(ctx.uid()) == 0 {
            if let Err(e) = self.store.set_online(ctx.uid(), false).await {
                tracing::warn!(user = %ctx.uid(), error = %e, "offline mirror failed");
            }
        }
        tracing::info!(user = %ctx.uid(), conn = %ctx.conn_id(), %reason, "disconnected");
    }
}
