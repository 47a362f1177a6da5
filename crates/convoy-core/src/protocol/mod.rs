//! Wire protocol (client and server events).
//!
//! Every frame is one JSON envelope tagged by `event`, with the payload under
//! `data`. Inbound events are decoded once into [`client::ClientEvent`] at the
//! transport edge; outbound events are serialized once per broadcast and the
//! resulting string is shared across all receiving connections.
//!
//! All parsers are panic-free: malformed input is reported as `ConvoyError`
//! instead of panicking, keeping the gateway resilient to hostile traffic.

pub mod client;
pub mod server;

pub use client::ClientEvent;
pub use server::ServerEvent;
