//! Inbound application events (client -> gateway).

use serde::{Deserialize, Serialize};

use crate::error::{ConvoyError, Result};
use crate::model::{MessageKind, Role};

/// One inbound event. Envelope shape: `{"event": "...", "data": {...}}`;
/// `data` is omitted for payload-less events (`ping`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        /// Informational only; the room's recorded role sublists win.
        #[serde(default)]
        role: Option<Role>,
    },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_id: String,
        content: String,
        #[serde(default, rename = "type")]
        kind: Option<MessageKind>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateLocation {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        accuracy: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    TypingStart { room_id: String },
    #[serde(rename_all = "camelCase")]
    TypingStop { room_id: String },
    #[serde(rename_all = "camelCase")]
    GetRoomUsers { room_id: String },
    Ping,
}

impl ClientEvent {
    /// Decode one inbound frame.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| ConvoyError::BadRequest(format!("invalid event json: {e}")))
    }
}
