//! Error types for the mahjong client.
//!
//! Only intents and the transport can fail. The session core itself is
//! infallible: stale snapshots are dropped, unknown tiles resolve to sentinel
//! names, and malformed action descriptors collapse to "nothing offered".

use thiserror::Error;

/// Errors that can occur when using the mahjong client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to send a message through the transport.
    #[error("transport send error: {0}")]
    TransportSend(String),

    /// Failed to receive a message from the transport.
    #[error("transport receive error: {0}")]
    TransportReceive(String),

    /// The transport connection was closed unexpectedly.
    #[error("transport connection closed")]
    TransportClosed,

    /// Failed to serialize or deserialize a protocol message.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The intent requires a live connection to the server.
    #[error("not connected to server")]
    NotConnected,

    /// The intent requires a logged-in session.
    #[error("not logged in")]
    NotLoggedIn,

    /// The intent requires the session to be inside a room.
    #[error("not in a room")]
    NotInRoom,

    /// The intent requires a game in progress.
    #[error("no game in progress")]
    NotInGame,

    /// The chosen action is not on the current menu, either because it was
    /// already submitted or because the server never offered it.
    #[error("action not offered")]
    ActionNotOffered,

    /// The intent is only valid outside of a room.
    #[error("already in a room")]
    AlreadyInRoom,

    /// An operation timed out.
    #[error("operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized [`Result`] type for mahjong client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
