//! Outbound event encoding tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use convoy_core::error::ConvoyError;
use convoy_core::model::{Message, MessageKind};
use convoy_core::protocol::ServerEvent;
use serde_json::Value;

#[test]
fn error_event_carries_stable_code() {
    let ev = ServerEvent::from_error(&ConvoyError::NotAMember("r1".into()));
    let v: Value = serde_json::from_str(&ev.encode().unwrap()).unwrap();
    assert_eq!(v["event"], "error");
    assert_eq!(v["data"]["code"], "NOT_IN_ROOM");
    assert!(v["data"]["message"].as_str().unwrap().contains("r1"));
}

#[test]
fn new_message_wire_shape() {
    let message = Message::new("u1", "Ada", None, "hi", MessageKind::Text);
    let ev = ServerEvent::NewMessage { room_id: "r1".into(), message };
    let v: Value = serde_json::from_str(&ev.encode().unwrap()).unwrap();
    assert_eq!(v["event"], "new_message");
    assert_eq!(v["data"]["roomId"], "r1");
    assert_eq!(v["data"]["message"]["userId"], "u1");
    assert_eq!(v["data"]["message"]["content"], "hi");
    assert_eq!(v["data"]["message"]["type"], "text");
    assert_eq!(v["data"]["message"]["edited"], false);
}

#[test]
fn error_reply_encodes_for_every_error() {
    // The session loop turns any of these into an `error` event on the
    // offender's connection; each must serialize cleanly.
    let errors = [
        ConvoyError::AuthFailed("bad token".into()),
        ConvoyError::RoomNotFound("r1".into()),
        ConvoyError::NotAMember("r1".into()),
        ConvoyError::EmptyContent,
        ConvoyError::InvalidCoordinate { lat: 91.0, lng: 0.0 },
        ConvoyError::Store("backend down".into()),
        ConvoyError::BadRequest("malformed payload".into()),
        ConvoyError::Internal("oops".into()),
    ];
    for err in &errors {
        let encoded = ServerEvent::from_error(err).encode().unwrap();
        let v: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(v["event"], "error", "variant: {err}");
        assert!(v["data"]["code"].is_string(), "variant: {err}");
    }
}

#[test]
fn pong_wire_shape() {
    let ev = ServerEvent::Pong { timestamp: 42 };
    let v: Value = serde_json::from_str(&ev.encode().unwrap()).unwrap();
    assert_eq!(v["event"], "pong");
    assert_eq!(v["data"]["timestamp"], 42);
}
