//! Top-level facade crate for Convoy.
//!
//! Re-exports core types and the gateway library so users can depend on a
//! single crate.

pub mod core {
    pub use convoy_core::*;
}

pub mod gateway {
    pub use convoy_gateway::*;
}
