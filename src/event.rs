//! Events emitted by [`MahjongClient`](crate::client::MahjongClient).
//!
//! The rendering layer never touches the session directly. It listens to this
//! stream and reads whatever state it needs through the client's accessors
//! after each event.

use std::collections::BTreeMap;

use crate::protocol::{ChatEntry, RoomId, SessionId, Tile};
use crate::session::{Notice, SessionPhase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The server accepted the connection and assigned `session_id`.
    Connected { session_id: SessionId },

    LoggedIn { username: String },
    LoginFailed { message: String },

    /// The room listing was replaced.
    RoomListUpdated { count: usize },
    RoomCreated { room_id: RoomId },
    RoomCreateFailed { message: String },
    RoomJoined { room_id: RoomId },
    RoomJoinFailed { message: String },

    /// The member roster of the current room changed.
    MembersUpdated { count: usize },
    MemberLeft { session_id: SessionId },

    /// A hand was dealt; `seat` is the local player's seat.
    GameStarted { seat: u8 },
    /// A game snapshot was merged into the local view.
    GameStateChanged { public: bool },
    GameOver { reason: String, winner: String },
    ActionResult {
        success: bool,
        message: String,
        kind: Option<String>,
    },
    HandsExposed(BTreeMap<String, Vec<Tile>>),
    Chat(ChatEntry),

    /// Something the user must be told about: a forced room exit or a lost
    /// connection.
    Notice(Notice),

    /// The session phase moved.
    PhaseChanged { from: SessionPhase, to: SessionPhase },

    /// The transport is gone. Always the last event.
    Disconnected { reason: Option<String> },
}
