//! Realtime runtime: connection registry, room grouping, and the egress
//! engine shared by all services.

pub mod core;
pub mod types;

pub use core::{ConnEntry, ConnHandle, ConnectionRegistry, RealtimeCore, RoomGrouping, SessionCtx};
pub use types::PreparedEvent;
