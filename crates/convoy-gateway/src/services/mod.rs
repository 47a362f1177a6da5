//! Gateway services: room session broker, message relay, presence sync.

pub mod messages;
pub mod presence;
pub mod rooms;

pub use messages::MessageService;
pub use presence::PresenceService;
pub use rooms::RoomService;
