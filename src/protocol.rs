//! Wire-compatible protocol types for the mahjong table server.
//!
//! Every message travels as one JSON envelope `{"event": <name>, "data": <payload>}`
//! where `<name>` is the server's snake_case event name. The server is loose
//! about a few shapes, so deserialization is deliberately lenient:
//!
//! - `actions` may be `null`, partial, or malformed (→ empty descriptor)
//! - `hu` / `kong` / `pong` may be `false`, `true`, or a tile token
//! - a player's `new` tile may be `null` (→ `""`)
//! - member `decorator` may be `null`

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

// ── Type aliases ────────────────────────────────────────────────────

/// Opaque connection identifier assigned by the server.
pub type SessionId = String;

/// Room identifier (a UUID string on the reference server).
pub type RoomId = String;

/// Compact tile token such as `"1t"`, `"e"` or `"joker"`.
pub type Tile = String;

/// The two tiles from hand that complete a chow with the claimed discard.
pub type ChowPair = [Tile; 2];

// ── Lenient field helpers ───────────────────────────────────────────

/// `null` becomes `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything that does not parse as `T` becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("malformed field replaced with its empty value: {e}");
            Ok(T::default())
        }
    }
}

// ── Rooms ───────────────────────────────────────────────────────────

/// Lifecycle of a room as shown in the lobby listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Waiting,
    /// A hand is being played. The reference server reports `"playing"`, and
    /// `"finished"` for the short cool-down after a hand.
    #[serde(alias = "playing", alias = "finished")]
    Gaming,
}

/// One entry of the pre-join room listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub game: String,
    /// Display name of the host, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub members: u32,
    pub max_members: u32,
    pub has_password: bool,
    pub status: RoomStatus,
}

// ── Members ─────────────────────────────────────────────────────────

/// Cosmetic choices a member attaches to their ready signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Decorator {
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub chara: String,
}

/// A connection present in the current room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Member {
    #[serde(alias = "name")]
    pub username: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub decorator: Option<Decorator>,
}

/// Room members keyed by session id, in the order the server listed them.
///
/// Seat inference depends on that order, so this is a vector of pairs rather
/// than a hash map. Serialized as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberMap(Vec<(SessionId, Member)>);

impl MemberMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, sid: &str) -> Option<&Member> {
        self.0.iter().find(|(k, _)| k == sid).map(|(_, m)| m)
    }

    pub fn contains(&self, sid: &str) -> bool {
        self.get(sid).is_some()
    }

    /// Zero-based position of `sid` in listing order.
    pub fn position(&self, sid: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k == sid)
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, sid: impl Into<SessionId>, member: Member) {
        let sid = sid.into();
        match self.0.iter_mut().find(|(k, _)| *k == sid) {
            Some((_, existing)) => *existing = member,
            None => self.0.push((sid, member)),
        }
    }

    pub fn remove(&mut self, sid: &str) -> Option<Member> {
        let idx = self.position(sid)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.0.iter().map(|(k, m)| (k.as_str(), m))
    }

    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(SessionId, Member)> for MemberMap {
    fn from_iter<I: IntoIterator<Item = (SessionId, Member)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (sid, member) in iter {
            map.insert(sid, member);
        }
        map
    }
}

impl Serialize for MemberMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (sid, member) in &self.0 {
            map.serialize_entry(sid, member)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MemberMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MemberMapVisitor;

        impl<'de> Visitor<'de> for MemberMapVisitor {
            type Value = MemberMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of members keyed by session id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MemberMap, A::Error> {
                let mut map = MemberMap::new();
                while let Some((sid, member)) = access.next_entry::<SessionId, Member>()? {
                    map.insert(sid, member);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MemberMapVisitor)
    }
}

// ── Gameplay ────────────────────────────────────────────────────────

/// Whose turn it is, as reported by the public snapshot.
///
/// On the wire this is a bare integer: `0..=3` for a seat, `5` while the table
/// waits for reactive claims after a discard. Any other value is kept as
/// `Seat(n)` so it writes back unchanged, and a warning is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ActiveSeat {
    Seat(u8),
    PendingClaims,
}

/// Wire value of [`ActiveSeat::PendingClaims`].
pub const PENDING_CLAIMS_INDEX: u8 = 5;

impl Default for ActiveSeat {
    fn default() -> Self {
        Self::Seat(0)
    }
}

impl From<u8> for ActiveSeat {
    fn from(value: u8) -> Self {
        match value {
            0..=3 => Self::Seat(value),
            PENDING_CLAIMS_INDEX => Self::PendingClaims,
            _ => {
                warn!(playerindex = value, "active seat outside the table");
                Self::Seat(value)
            }
        }
    }
}

impl From<ActiveSeat> for u8 {
    fn from(value: ActiveSeat) -> Self {
        match value {
            ActiveSeat::Seat(seat) => seat,
            ActiveSeat::PendingClaims => PENDING_CLAIMS_INDEX,
        }
    }
}

/// Public per-seat record from `game_state_update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Player {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub hasnew: bool,
    pub id: u8,
    pub name: String,
    #[serde(default)]
    pub hand_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: Vec<Tile>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discarded: Vec<Tile>,
}

/// One reaction slot of an [`ActionDescriptor`].
///
/// The server writes `false` for "not offered", a tile token for a claim on
/// that tile, and `true` for a self-drawn hu. Both shapes are kept verbatim so
/// the descriptor round-trips untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOffer {
    Flag(bool),
    Tile(Tile),
}

impl Default for ActionOffer {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl ActionOffer {
    /// Truthiness as the server means it: `true` or a non-empty tile.
    pub fn is_offered(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Tile(tile) => !tile.is_empty(),
        }
    }

    pub fn tile(&self) -> Option<&str> {
        match self {
            Self::Tile(tile) => Some(tile),
            Self::Flag(_) => None,
        }
    }
}

/// Reactive actions the server currently offers the local player.
///
/// Note the asymmetry: `hu`/`kong`/`pong` use `false` for "not offered" while
/// `chow` uses an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ActionDescriptor {
    #[serde(default, deserialize_with = "lenient")]
    pub hu: ActionOffer,
    #[serde(default, deserialize_with = "lenient")]
    pub kong: ActionOffer,
    #[serde(default, deserialize_with = "lenient")]
    pub pong: ActionOffer,
    #[serde(default, deserialize_with = "lenient")]
    pub chow: Vec<ChowPair>,
}

impl ActionDescriptor {
    pub fn is_empty(&self) -> bool {
        !self.hu.is_offered()
            && !self.kong.is_offered()
            && !self.pong.is_offered()
            && self.chow.is_empty()
    }
}

/// The value sent back when the player picks an offered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionPayload {
    /// `true` for hu, kong and pong.
    Confirm(bool),
    /// The chosen chow completion pair.
    Chow(ChowPair),
}

/// `game_state_update`: state every seat can see.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicSnapshot {
    pub players: Vec<Player>,
    pub playerindex: ActiveSeat,
    pub wall_count: u32,
    /// Human-readable narration of what just happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

/// `private_state_update`: the local seat's hidden state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateSnapshot {
    pub id: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hands: Vec<Tile>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: Vec<Tile>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new: Tile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discarded: Vec<Tile>,
    #[serde(default, deserialize_with = "lenient")]
    pub actions: ActionDescriptor,
}

// ── Chat ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// A line of the room's chat panel: either player chat or a server log line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatEntry {
    Chat {
        name: String,
        message: String,
    },
    Log {
        #[serde(default)]
        level: LogLevel,
        message: String,
    },
}

// ── Messages ────────────────────────────────────────────────────────

/// In-game move submitted through `game_action`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum GameAction {
    /// Discard the tile at `tileindex` in hand, or the freshly drawn tile when
    /// no index is given.
    Discard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tileindex: Option<usize>,
    },
    Hu,
    Kong,
    Pong,
    Chow { tiles: ChowPair },
}

/// Intents sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Log in under a display name.
    JoinServer { name: String },
    /// Ask for a fresh room listing.
    GetRooms,
    /// Ask for the member list of the room the client sits in.
    GetRoomInfo { room_id: RoomId },
    CreateRoom {
        name: String,
        #[serde(default)]
        password: String,
    },
    JoinRoom {
        room_id: RoomId,
        #[serde(default)]
        password: String,
    },
    LeaveRoom,
    PlayerReady {
        ready: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decorator: Option<Decorator>,
    },
    GameAction(GameAction),
    ChatMessage { message: String },
}

/// Events pushed from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The connection is up and has been assigned a session id.
    ConnectRes {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        message: String,
        clientsid: SessionId,
    },
    /// Result of a `join_server` login attempt.
    JoinServerResult {
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        room_list: Vec<RoomSummary>,
    },
    RoomListUpdate {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default, deserialize_with = "null_as_default")]
        room_list: Vec<RoomSummary>,
    },
    CreateRoomResult {
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
    },
    JoinRoomResult {
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<RoomId>,
    },
    LeaveRoomResult {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        message: String,
    },
    /// The host left and the room was dissolved.
    RoomDeleted {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        message: String,
    },
    RoomInfoUpdate {
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        members: Option<MemberMap>,
    },
    PlayerLeft { sid: SessionId },
    /// A hand has been dealt; `my_id` is the local seat.
    GameInitialized { my_id: u8 },
    GameStateUpdate(PublicSnapshot),
    PrivateStateUpdate(PrivateSnapshot),
    GameOver {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        reason: String,
        #[serde(default)]
        winner: String,
    },
    GameActionResult {
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
    ChatMessage(ChatEntry),
    /// Every seat's hand, revealed once a hand is over. Keyed by seat id.
    ExposeHands(BTreeMap<String, Vec<Tile>>),
}
