//! Persistent store boundary.
//!
//! The store is the sole owner of durable User and Room state. The gateway
//! treats every read as a snapshot that may already be stale, and every write
//! as a single store operation. In particular [`Store::append_message`] must
//! apply append + trim + counter increment atomically so concurrent senders
//! to the same room cannot interleave a partial update.

pub mod memory;

use async_trait::async_trait;

use convoy_core::error::Result;
use convoy_core::model::{Location, Message, Room, User};

pub use memory::MemStore;

/// Document-store operations consumed by the gateway. The production
/// backend lives behind this trait.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, uid: &str) -> Result<Option<User>>;

    /// Set the online flag and refresh last-seen.
    async fn set_online(&self, uid: &str, online: bool) -> Result<()>;

    /// Replace the last-known location (all fields written together).
    async fn set_location(&self, uid: &str, location: Location) -> Result<()>;

    /// Update the denormalized current-room hint.
    async fn set_current_room(&self, uid: &str, room_id: Option<String>) -> Result<()>;

    /// Users whose current-room hint equals `room_id` (roster queries).
    async fn users_in_room(&self, room_id: &str) -> Result<Vec<User>>;

    async fn get_room(&self, room_id: &str) -> Result<Option<Room>>;

    /// Atomic append + trim-to-cap + counter increment. Returns the message
    /// as stored.
    async fn append_message(&self, room_id: &str, message: Message) -> Result<Message>;
}
