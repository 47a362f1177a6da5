//! In-process store implementation backed by `DashMap`.
//!
//! Each update runs while holding the document's map entry, so per-document
//! field groups (message log + counter) change as one atomic step. Used for
//! development and tests; a remote document store implements the same trait.

use async_trait::async_trait;
use dashmap::DashMap;

use convoy_core::error::{ConvoyError, Result};
use convoy_core::model::{now_ms, Location, Message, Room, User};

use super::Store;

#[derive(Default)]
pub struct MemStore {
    users: DashMap<String, User>,
    rooms: DashMap<String, Room>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Seed or replace a user document.
    pub fn put_user(&self, user: User) {
        self.users.insert(user.uid.clone(), user);
    }

    /// Seed or replace a room document.
    pub fn put_room(&self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    fn with_user<T>(&self, uid: &str, f: impl FnOnce(&mut User) -> T) -> Result<T> {
        let mut entry = self
            .users
            .get_mut(uid)
            .ok_or_else(|| ConvoyError::Store(format!("unknown user: {uid}")))?;
        Ok(f(entry.value_mut()))
    }
}

#[async_trait]
impl Store for MemStore {
    async fn get_user(&self, uid: &str) -> Result<Option<User>> {
        Ok(self.users.get(uid).map(|u| u.value().clone()))
    }

    async fn set_online(&self, uid: &str, online: bool) -> Result<()> {
        self.with_user(uid, |u| {
            u.is_online = online;
            u.last_seen = now_ms();
        })
    }

    async fn set_location(&self, uid: &str, location: Location) -> Result<()> {
        self.with_user(uid, |u| {
            u.location = Some(location);
        })
    }

    async fn set_current_room(&self, uid: &str, room_id: Option<String>) -> Result<()> {
        self.with_user(uid, |u| {
            u.current_room = room_id;
        })
    }

    async fn users_in_room(&self, room_id: &str) -> Result<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.value().current_room.as_deref() == Some(room_id))
            .map(|u| u.value().clone())
            .collect())
    }

    async fn get_room(&self, room_id: &str) -> Result<Option<Room>> {
        Ok(self.rooms.get(room_id).map(|r| r.value().clone()))
    }

    async fn append_message(&self, room_id: &str, message: Message) -> Result<Message> {
        let mut entry = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| ConvoyError::RoomNotFound(room_id.to_string()))?;
        entry.value_mut().push_message(message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use convoy_core::model::{MessageKind, MESSAGE_LOG_CAP};

    use super::*;

    fn seeded() -> MemStore {
        let store = MemStore::new();
        store.put_user(User::new("u1", "Ada"));
        let mut room = Room::new("r1", "commute");
        room.participants = vec!["u1".into()];
        store.put_room(room);
        store
    }

    #[tokio::test]
    async fn append_bumps_counter_and_caps_log() {
        let store = seeded();
        for n in 0..(MESSAGE_LOG_CAP + 1) {
            let m = Message::new("u1", "Ada", None, format!("m{n}"), MessageKind::Text);
            store.append_message("r1", m).await.unwrap();
        }
        let room = store.get_room("r1").await.unwrap().unwrap();
        assert_eq!(room.messages.len(), MESSAGE_LOG_CAP);
        assert_eq!(room.messages[0].content, "m1");
        assert_eq!(room.total_messages, (MESSAGE_LOG_CAP + 1) as u64);
    }

    #[tokio::test]
    async fn append_to_missing_room_fails() {
        let store = seeded();
        let m = Message::new("u1", "Ada", None, "hi", MessageKind::Text);
        let err = store.append_message("nope", m).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "ROOM_NOT_FOUND");
    }

    #[tokio::test]
    async fn roster_query_filters_on_current_room() {
        let store = seeded();
        store.put_user(User::new("u2", "Grace"));
        store
            .set_current_room("u1", Some("r1".into()))
            .await
            .unwrap();

        let users = store.users_in_room("r1").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].uid, "u1");
    }

    #[tokio::test]
    async fn presence_writes_touch_last_seen() {
        let store = seeded();
        store.set_online("u1", true).await.unwrap();
        let u = store.get_user("u1").await.unwrap().unwrap();
        assert!(u.is_online);
        assert!(u.last_seen > 0);

        // best-effort paths report missing users as store errors
        let err = store.set_online("ghost", true).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "STORE_ERROR");
    }
}
