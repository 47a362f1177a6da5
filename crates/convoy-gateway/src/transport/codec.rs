//! Decode-once codec for the transport layer.
//!
//! - Text frames => `ClientEvent`
//! - Ping/Pong/Close are surfaced for lifecycle management
//! - Binary frames are not part of this protocol and are rejected

use axum::extract::ws::Message;

use convoy_core::error::{ConvoyError, Result};
use convoy_core::protocol::ClientEvent;

#[derive(Debug)]
pub enum Inbound {
    Event(ClientEvent),
    Ping(Vec<u8>),
    Pong,
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => Ok(Inbound::Event(ClientEvent::decode(&s)?)),
        Message::Binary(_) => Err(ConvoyError::BadRequest(
            "binary frames are not supported".into(),
        )),
        Message::Ping(v) => Ok(Inbound::Ping(v)),
        Message::Pong(_) => Ok(Inbound::Pong),
        Message::Close(_) => Ok(Inbound::Close),
    }
}
