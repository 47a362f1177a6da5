//! Convoy core: protocol events, data model, and the shared error surface.
//!
//! This crate defines the wire-level contracts and the error taxonomy shared
//! by the gateway, its services, and client tooling. It intentionally carries
//! no transport or runtime dependencies so it can be reused in multiple
//! contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ConvoyError`/`Result` so the gateway
//! process does not crash on malformed input or bad traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{ConvoyError, Result};
