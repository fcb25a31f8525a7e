//! Transport abstraction for the table server connection.
//!
//! The [`Transport`] trait is a bidirectional text message channel. Every
//! message is one JSON envelope `{"event": ..., "data": ...}`; framing is the
//! transport's job (WebSocket frames, a socket.io bridge, an in-process
//! channel for tests).
//!
//! Connection setup is not part of this trait. Build a connected transport
//! externally, then hand it to `MahjongClient::start`. The session core never
//! initiates network I/O itself.
//!
//! # Implementing a Custom Transport
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use mahjong_client::error::ClientError;
//! use mahjong_client::transport::Transport;
//!
//! struct MyTransport { /* ... */ }
//!
//! #[async_trait]
//! impl Transport for MyTransport {
//!     async fn send(&mut self, message: String) -> Result<(), ClientError> {
//!         todo!()
//!     }
//!
//!     async fn recv(&mut self) -> Option<Result<String, ClientError>> {
//!         // Return None when the server closes the connection cleanly.
//!         todo!()
//!     }
//!
//!     async fn close(&mut self) -> Result<(), ClientError> {
//!         todo!()
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::ClientError;

/// A bidirectional text message transport to the table server.
///
/// Each call to [`send`](Transport::send) transmits one complete JSON envelope.
/// Each call to [`recv`](Transport::recv) returns one complete JSON envelope.
///
/// # Cancel Safety
///
/// [`recv`](Transport::recv) **MUST** be cancel-safe because the client polls
/// it inside `tokio::select!`. Channel-backed implementations are naturally
/// cancel-safe.
#[async_trait]
pub trait Transport: Send + 'static {
    /// Send a JSON text message to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TransportSend`] if the message could not be sent.
    async fn send(&mut self, message: String) -> Result<(), ClientError>;

    /// Receive the next JSON text message from the server.
    ///
    /// Returns:
    /// - `Some(Ok(text))` for a complete message
    /// - `Some(Err(e))` for a transport failure
    /// - `None` once the server has closed the connection
    async fn recv(&mut self) -> Option<Result<String, ClientError>>;

    /// Close the transport connection gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if the close handshake fails. Implementations should
    /// still release resources in that case.
    async fn close(&mut self) -> Result<(), ClientError>;
}
