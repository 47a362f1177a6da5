//! Outbound events (gateway -> client(s)).

use serde::{Deserialize, Serialize};

use crate::error::{ClientCode, ConvoyError, Result};
use crate::model::{Location, Message, Role, Room};

/// Minimal user identity carried in the post-auth ack and presence notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBrief {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Presence-join payload: identity plus the role resolved from the room's
/// recorded sublists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPeer {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub role: Role,
}

/// One roster entry returned by `get_room_users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUser {
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub is_online: bool,
    pub last_seen: u64,
}

/// One outbound event. Same envelope shape as inbound: tagged by `event`,
/// payload under `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    Connected { user: UserBrief, timestamp: u64 },
    #[serde(rename_all = "camelCase")]
    JoinedRoom { room_id: String, room: Room },
    #[serde(rename_all = "camelCase")]
    LeftRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    UserConnectedToRoom { user: RoomPeer, timestamp: u64 },
    #[serde(rename_all = "camelCase")]
    UserDisconnectedFromRoom {
        user_id: String,
        user_name: String,
        #[serde(default)]
        reason: Option<String>,
        timestamp: u64,
    },
    #[serde(rename_all = "camelCase")]
    NewMessage { room_id: String, message: Message },
    #[serde(rename_all = "camelCase")]
    UserLocationUpdate {
        user_id: String,
        user_name: String,
        location: Location,
    },
    #[serde(rename_all = "camelCase")]
    UserTyping {
        user_id: String,
        user_name: String,
        is_typing: bool,
    },
    #[serde(rename_all = "camelCase")]
    RoomUsers {
        room_id: String,
        users: Vec<RoomUser>,
    },
    Error { message: String, code: String },
    #[serde(rename_all = "camelCase")]
    Pong { timestamp: u64 },
}

impl ServerEvent {
    /// Build an `error` event from any application error, preserving the
    /// stable client code.
    pub fn from_error(err: &ConvoyError) -> Self {
        ServerEvent::Error {
            message: err.to_string(),
            code: err.client_code().as_str().to_string(),
        }
    }

    /// Shorthand used where only the code matters.
    pub fn error(code: ClientCode, message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
            code: code.as_str().to_string(),
        }
    }

    /// Encode to the wire string (serialize once, send N times).
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ConvoyError::Internal(format!("event encode failed: {e}")))
    }
}
