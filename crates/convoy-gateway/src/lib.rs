//! Convoy gateway library entry.
//!
//! This crate wires the transport, auth, store boundary, dispatcher, realtime
//! core, and the room/message/presence services into a cohesive gateway
//! stack. It is intended to be consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod ops;
pub mod realtime;
pub mod router;
pub mod services;
pub mod store;
pub mod transport;
