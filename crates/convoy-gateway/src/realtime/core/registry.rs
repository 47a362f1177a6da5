use axum::extract::ws::Message;
use dashmap::{DashMap, DashSet};
use tokio::sync::mpsc;

use convoy_core::model::now_ms;

use crate::auth::Identity;

/// One connection's outbound queue sender.
#[derive(Clone)]
pub struct ConnHandle {
    pub tx: mpsc::Sender<Message>,
}

/// Live connection record. `current_room` is the only mutable field besides
/// timestamps; it is written only by the session's own event handling, never
/// by another connection's.
#[derive(Clone)]
pub struct ConnEntry {
    pub handle: ConnHandle,
    pub identity: Identity,
    pub current_room: Option<String>,
    pub connected_at: u64,
}

/// Connection registry:
/// - `conn_id -> ConnEntry`
/// - `uid -> {conn_id...}` (multi-device: later registrations never evict
///   earlier ones)
#[derive(Default)]
pub struct ConnectionRegistry {
    conns: DashMap<String, ConnEntry>,
    user_index: DashMap<String, DashSet<String>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            conns: DashMap::new(),
            user_index: DashMap::new(),
        }
    }

    pub fn register(&self, conn_id: String, identity: Identity, handle: ConnHandle) {
        self.user_index
            .entry(identity.uid.clone())
            .or_insert_with(DashSet::new)
            .insert(conn_id.clone());

        self.conns.insert(
            conn_id,
            ConnEntry {
                handle,
                identity,
                current_room: None,
                connected_at: now_ms(),
            },
        );
    }

    /// Remove a connection, returning the removed record so the caller can
    /// run room cleanup against its last-known state.
    pub fn unregister(&self, conn_id: &str) -> Option<ConnEntry> {
        let (_, entry) = self.conns.remove(conn_id)?;
        if let Some(set) = self.user_index.get(&entry.identity.uid) {
            set.remove(conn_id);
            if set.is_empty() {
                drop(set);
                self.user_index.remove(&entry.identity.uid);
            }
        }
        Some(entry)
    }

    pub fn handle(&self, conn_id: &str) -> Option<ConnHandle> {
        self.conns.get(conn_id).map(|e| e.value().handle.clone())
    }

    pub fn current_room(&self, conn_id: &str) -> Option<String> {
        self.conns
            .get(conn_id)
            .and_then(|e| e.value().current_room.clone())
    }

    pub fn set_current_room(&self, conn_id: &str, room_id: Option<String>) {
        if let Some(mut e) = self.conns.get_mut(conn_id) {
            e.value_mut().current_room = room_id;
        }
    }

    /// Live connection count for one identity.
    pub fn session_count(&self, uid: &str) -> usize {
        self.user_index.get(uid).map(|s| s.len()).unwrap_or(0)
    }

    pub fn total_connections(&self) -> usize {
        self.conns.len()
    }
}
