//! Shared error type across Convoy crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
///
/// Clients branch on these codes, never on the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Handshake credential missing or failed verification.
    AuthFailed,
    /// Room does not exist in the store.
    RoomNotFound,
    /// Sender is not on the room's membership list.
    NotInRoom,
    /// Message content empty after trimming.
    MissingContent,
    /// Latitude/longitude outside the valid range.
    InvalidCoordinates,
    /// Durable-store operation failed on a critical path.
    StoreError,
    /// Invalid input / malformed event.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON `error` events.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::RoomNotFound => "ROOM_NOT_FOUND",
            ClientCode::NotInRoom => "NOT_IN_ROOM",
            ClientCode::MissingContent => "MISSING_CONTENT",
            ClientCode::InvalidCoordinates => "INVALID_COORDINATES",
            ClientCode::StoreError => "STORE_ERROR",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ConvoyError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ConvoyError {
    #[error("auth failed: {0}")]
    AuthFailed(String),
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("not a member of room {0}")]
    NotAMember(String),
    #[error("message content is empty")]
    EmptyContent,
    #[error("invalid coordinates: lat={lat} lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("store error: {0}")]
    Store(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ConvoyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ConvoyError::AuthFailed(_) => ClientCode::AuthFailed,
            ConvoyError::RoomNotFound(_) => ClientCode::RoomNotFound,
            ConvoyError::NotAMember(_) => ClientCode::NotInRoom,
            ConvoyError::EmptyContent => ClientCode::MissingContent,
            ConvoyError::InvalidCoordinate { .. } => ClientCode::InvalidCoordinates,
            ConvoyError::Store(_) => ClientCode::StoreError,
            ConvoyError::BadRequest(_) => ClientCode::BadRequest,
            ConvoyError::Internal(_) => ClientCode::Internal,
        }
    }
}
