//! # Mahjong Client
//!
//! Transport-agnostic client core for a real-time, four-seat mahjong table
//! server.
//!
//! The crate keeps a local mirror of the server's view of this client: which
//! phase the session is in, the room listing and member roster, and the
//! public and private game snapshots. It also turns raw tile codes into names,
//! glyphs and an action menu for a rendering layer.
//!
//! ## Features
//!
//! - **Synchronous core**: [`Session`], [`dispatch`] and [`tiles`] are plain
//!   owned data with no I/O
//! - **Transport-agnostic**: implement the [`Transport`] trait for any backend
//! - **WebSocket built-in**: the default `transport-websocket` feature provides
//!   `WebSocketTransport`
//! - **Event-driven**: [`MahjongClient`] emits typed [`ClientEvent`]s on a channel
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mahjong_client::{ClientConfig, ClientEvent, MahjongClient, WebSocketTransport};
//!
//! let transport = WebSocketTransport::connect("ws://localhost:5000/ws").await?;
//! let (client, mut events) = MahjongClient::start(transport, ClientConfig::new());
//! while let Some(event) = events.recv().await {
//!     if let ClientEvent::Connected { .. } = event {
//!         client.login("Alice").await?;
//!     }
//! }
//! ```

pub mod chat;
#[cfg(feature = "tokio-runtime")]
pub mod client;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod game;
pub mod protocol;
pub mod roster;
pub mod session;
pub mod tiles;
pub mod transport;
pub mod transports;

pub use chat::ChatLog;
#[cfg(feature = "tokio-runtime")]
pub use client::{ClientConfig, MahjongClient};
pub use error::ClientError;
pub use event::ClientEvent;
pub use protocol::{ClientMessage, ServerMessage};
pub use session::{Session, SessionPhase};
pub use transport::Transport;

#[cfg(feature = "transport-websocket")]
pub use transports::WebSocketTransport;
