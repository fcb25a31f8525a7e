//! Session state machine.
//!
//! The phase is never stored. It is derived on every read from four nested
//! flags, coarsest first:
//!
//! ```text
//! connected ── is_login ── is_room ── is_gaming
//!
//! Disconnected ─connect─▶ NoLogin ─login─▶ Login ─join_room─▶ Room ─start_game─▶ Gaming
//!      ▲                     ▲              ▲  ▲                ▲                   │
//!      │                     └───logout─────┘  └───leave_room───┴───── end_game ────┘
//!      └──────────────────────── disconnect (from anywhere) ───────────────────────┘
//! ```
//!
//! A finer flag is only ever raised while its coarser flag is up, and every
//! retreat clears all finer flags together with the caches that depend on
//! them. An advance requested from the wrong phase is dropped with a warning,
//! which keeps `is_gaming && !is_room` (and every other broken nesting)
//! unobservable for any call sequence.
//!
//! [`Session`] owns the flags and identity, and composes the
//! [`GameState`](crate::game::GameState) reducer and the
//! [`RoomCache`](crate::roster::RoomCache) so that retreats can clear them.

use std::fmt;

use tracing::{debug, info, warn};

use crate::game::{GameInfo, GameState, Snapshot};
use crate::protocol::{Member, MemberMap, Player, RoomId, RoomSummary, SessionId};
use crate::roster::RoomCache;

/// Where the local client currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Disconnected,
    NoLogin,
    Login,
    Room,
    Gaming,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::NoLogin => "nologin",
            Self::Login => "login",
            Self::Room => "room",
            Self::Gaming => "gaming",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four raw phase flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    pub connected: bool,
    pub is_login: bool,
    pub is_room: bool,
    pub is_gaming: bool,
}

impl SessionFlags {
    /// Derive the phase, honoring flags strictly coarse to fine.
    pub fn phase(&self) -> SessionPhase {
        if !self.connected {
            SessionPhase::Disconnected
        } else if !self.is_login {
            SessionPhase::NoLogin
        } else if !self.is_room {
            SessionPhase::Login
        } else if !self.is_gaming {
            SessionPhase::Room
        } else {
            SessionPhase::Gaming
        }
    }

    /// Whether every raised flag has all its coarser flags raised too.
    pub fn is_nested(&self) -> bool {
        (!self.is_login || self.connected)
            && (!self.is_room || self.is_login)
            && (!self.is_gaming || self.is_room)
    }
}

/// Who the local client is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    /// Empty while not logged in.
    pub username: String,
    /// Connection id assigned by the server.
    pub session_id: SessionId,
    /// Seat 0..=3; meaningful only while in a room.
    pub player_index: u8,
}

/// User-visible signal raised by a retreat that the user did not ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ConnectionLost,
    /// Forced out of the room, with the server's reason.
    RoomExit { reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionLost => {
                f.write_str("Lost connection to server. Please reconnect.")
            }
            Self::RoomExit { reason } => f.write_str(reason),
        }
    }
}

/// The client's whole synchronized state.
///
/// `Session::default()` is the zero state, identical to the state after
/// [`disconnect`](Session::disconnect).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    flags: SessionFlags,
    identity: Identity,
    room_id: RoomId,
    game: GameState,
    rooms: RoomCache,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Derived state ───────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.flags.phase()
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn session_id(&self) -> &str {
        &self.identity.session_id
    }

    pub fn player_index(&self) -> u8 {
        self.identity.player_index
    }

    /// Current room id, `""` outside a room.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// The transport is up and the server assigned `session_id`.
    pub fn connect(&mut self, session_id: impl Into<SessionId>) {
        self.flags.connected = true;
        self.identity.session_id = session_id.into();
        info!(session_id = %self.identity.session_id, phase = %self.phase(), "connected");
    }

    /// Hard reset to the zero state, reachable from any phase.
    #[must_use = "the connection-lost notice must be shown to the user"]
    pub fn disconnect(&mut self) -> Notice {
        *self = Self::default();
        warn!(phase = %self.phase(), "connection lost");
        Notice::ConnectionLost
    }

    pub fn login(&mut self, username: impl Into<String>) {
        if !self.flags.connected {
            warn!(phase = %self.phase(), "ignoring login while disconnected");
            return;
        }
        self.identity.username = username.into();
        self.flags.is_login = true;
        debug!(username = %self.identity.username, phase = %self.phase(), "logged in");
    }

    /// Drop the whole identity and everything below the lobby. The flags
    /// still report `nologin` because the transport is up.
    pub fn logout(&mut self) {
        self.identity = Identity::default();
        self.room_id.clear();
        self.rooms.clear();
        self.game.clear();
        self.flags.is_login = false;
        self.flags.is_room = false;
        self.flags.is_gaming = false;
        debug!(phase = %self.phase(), "logged out");
    }

    /// Enter `room_id`. Re-entering from a game also drops the game state.
    pub fn join_room(&mut self, room_id: impl Into<RoomId>) {
        if !self.flags.is_login {
            warn!(phase = %self.phase(), "ignoring room join before login");
            return;
        }
        self.room_id = room_id.into();
        self.flags.is_room = true;
        self.flags.is_gaming = false;
        self.game.clear();
        debug!(room_id = %self.room_id, phase = %self.phase(), "joined room");
    }

    /// Leave the current room, dropping every room and game cache.
    #[must_use = "the room-exit notice must be shown to the user"]
    pub fn leave_room(&mut self, reason: impl Into<String>) -> Notice {
        self.room_id.clear();
        self.identity.player_index = 0;
        self.rooms.clear();
        self.game.clear();
        self.flags.is_room = false;
        self.flags.is_gaming = false;
        let reason = reason.into();
        debug!(%reason, phase = %self.phase(), "left room");
        Notice::RoomExit { reason }
    }

    pub fn start_game(&mut self) {
        if !self.flags.is_room {
            warn!(phase = %self.phase(), "ignoring game start outside a room");
            return;
        }
        self.flags.is_gaming = true;
        debug!(phase = %self.phase(), "game started");
    }

    pub fn end_game(&mut self) {
        self.flags.is_gaming = false;
        self.identity.player_index = 0;
        self.game.clear();
        debug!(phase = %self.phase(), "game ended");
    }

    /// Record the local seat announced at the start of a hand.
    pub fn set_player_index(&mut self, seat: u8) {
        self.identity.player_index = seat;
    }

    // ── Game view ───────────────────────────────────────────────────

    /// Route a snapshot to the reducer, gated on the current phase. Returns
    /// whether it was applied.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> bool {
        let phase = self.phase();
        self.game.apply(phase, snapshot)
    }

    pub fn reset_actions(&mut self) {
        self.game.reset_actions();
    }

    pub fn game_info(&self) -> &GameInfo {
        self.game.info()
    }

    pub fn players(&self) -> Option<&[Player]> {
        self.game.players()
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.game.player(seat)
    }

    // ── Rooms and members ───────────────────────────────────────────

    pub fn update_room_list(&mut self, rooms: Vec<RoomSummary>) {
        self.rooms.update_room_list(rooms);
    }

    pub fn rooms(&self) -> &[RoomSummary] {
        self.rooms.rooms()
    }

    pub fn replace_members(&mut self, members: MemberMap) {
        self.rooms.replace_members(members);
    }

    pub fn remove_member(&mut self, sid: &str) -> Option<Member> {
        self.rooms.remove_member(sid)
    }

    pub fn members(&self) -> &MemberMap {
        self.rooms.members()
    }

    pub fn member(&self, sid: &str) -> Option<&Member> {
        self.rooms.member(sid)
    }

    pub fn all_members_except(&self, sid: &str) -> MemberMap {
        self.rooms.all_members_except(sid)
    }

    pub fn member_index_of(&self, sid: &str) -> Option<usize> {
        self.rooms.member_index_of(sid)
    }
}
