//! Realtime core components.
//!
//! Connection registry, transport-level room grouping, and the egress
//! runtime/context shared across services.

mod egress;
mod grouping;
mod registry;

pub use egress::{RealtimeCore, SessionCtx};
pub use grouping::RoomGrouping;
pub use registry::{ConnEntry, ConnHandle, ConnectionRegistry};
