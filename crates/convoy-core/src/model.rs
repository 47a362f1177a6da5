//! Durable data model: users, rooms, and the bounded message log.
//!
//! These types mirror the documents held by the persistent store. The gateway
//! never holds an authoritative copy: every fetched value is a snapshot that
//! may be stale by the time it is used, so membership is re-checked after
//! every store round trip instead of cached.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of messages retained per room. Appending past the cap
/// evicts the oldest entry.
pub const MESSAGE_LOG_CAP: usize = 100;

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Role of a member within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Driver,
    Passenger,
}

/// Last-known position of a user. All four fields are written together; a
/// user either has a complete location or none at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub timestamp: u64,
}

impl Location {
    /// Range check: latitude in [-90, 90], longitude in [-180, 180].
    pub fn coordinates_valid(lat: f64, lng: f64) -> bool {
        (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
    }
}

/// Durable user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub last_seen: u64,
    #[serde(default)]
    pub location: Option<Location>,
    /// Denormalized hint for roster queries; never consulted for
    /// authorization.
    #[serde(default)]
    pub current_room: Option<String>,
}

impl User {
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            photo_url: None,
            is_online: false,
            last_seen: 0,
            location: None,
            current_room: None,
        }
    }
}

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    Location,
    System,
}

/// One entry in a room's message log. Immutable once appended; only evicted
/// by the log cap. Sender name/photo are snapshots taken at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_photo: Option<String>,
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: MessageKind,
    pub timestamp: u64,
    #[serde(default)]
    pub edited: bool,
}

impl Message {
    /// Build a fresh message with a generated id and server timestamp.
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_photo: Option<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_photo,
            content: content.into(),
            kind,
            timestamp: now_ms(),
            edited: false,
        }
    }
}

/// Durable room record. Membership (`participants`) is the authorization
/// source of truth for joining and sending; `drivers`/`passengers` are
/// disjoint role sublists of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub participants: Vec<String>,
    #[serde(default)]
    pub drivers: Vec<String>,
    #[serde(default)]
    pub passengers: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default = "default_max_participants")]
    pub max_participants: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_max_participants() -> u32 {
    50
}
fn default_true() -> bool {
    true
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            participants: Vec::new(),
            drivers: Vec::new(),
            passengers: Vec::new(),
            messages: Vec::new(),
            current_participants: 0,
            total_messages: 0,
            max_participants: default_max_participants(),
            is_active: true,
        }
    }

    pub fn is_member(&self, uid: &str) -> bool {
        self.participants.iter().any(|p| p == uid)
    }

    /// Resolve a member's role from the recorded sublists. The sublists win
    /// over any role a caller supplies alongside a join request.
    pub fn resolve_role(&self, uid: &str) -> Role {
        if self.drivers.iter().any(|d| d == uid) {
            Role::Driver
        } else {
            Role::Passenger
        }
    }

    /// Append a message, evict past the cap, bump the counter. The store
    /// must run this under the room entry's lock so the three effects land
    /// as one atomic update.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > MESSAGE_LOG_CAP {
            let overflow = self.messages.len() - MESSAGE_LOG_CAP;
            self.messages.drain(..overflow);
        }
        self.total_messages += 1;
    }
}
