//! Game snapshot reducer.
//!
//! Merges the two server pushes, the public `game_state_update` and the
//! private `private_state_update`, into one local view of the table.
//!
//! Each message replaces the fields it carries wholesale. Nothing is diffed or
//! merged per field, so a dropped message is corrected by the next one.
//! Snapshots that arrive while the session is not in
//! [`SessionPhase::Gaming`] are dropped: they are in-flight leftovers of a
//! hand that already ended.

use tracing::{debug, warn};

use crate::protocol::{
    ActionDescriptor, ActiveSeat, Player, PrivateSnapshot, PublicSnapshot, Tile,
};
use crate::session::SessionPhase;

/// The local client's merged view of the current hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameInfo {
    /// Set by the first public snapshot of a hand, never cleared until reset.
    pub init: bool,
    /// Local seat id as echoed by the private snapshot.
    pub id: u8,
    pub active_player: ActiveSeat,
    pub wall_count: u32,
    pub hands: Vec<Tile>,
    pub locked: Vec<Tile>,
    /// Freshly drawn tile, `""` when none.
    pub new: Tile,
    pub discarded: Vec<Tile>,
    pub actions: ActionDescriptor,
}

/// A server push routed to [`GameState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Public(PublicSnapshot),
    Private(PrivateSnapshot),
}

impl Snapshot {
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public(_))
    }
}

/// Owner of [`GameInfo`] and the per-seat [`Player`] list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    info: GameInfo,
    /// `None` until the first public snapshot of a hand.
    players: Option<Vec<Player>>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn players(&self) -> Option<&[Player]> {
        self.players.as_deref()
    }

    /// Seat record by position in the server's list.
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.as_ref()?.get(seat)
    }

    /// Apply one snapshot. Returns `false`, leaving every field untouched,
    /// when `phase` is anything but [`SessionPhase::Gaming`].
    pub fn apply(&mut self, phase: SessionPhase, snapshot: Snapshot) -> bool {
        if phase != SessionPhase::Gaming {
            warn!(
                %phase,
                public = snapshot.is_public(),
                "dropping game snapshot outside of a game"
            );
            return false;
        }

        match snapshot {
            Snapshot::Public(fragment) => self.apply_public(fragment),
            Snapshot::Private(fragment) => self.apply_private(fragment),
        }
        true
    }

    fn apply_public(&mut self, fragment: PublicSnapshot) {
        self.players = Some(fragment.players);
        if !self.info.init {
            self.info.init = true;
            debug!("first public snapshot of the hand");
        }
        self.info.active_player = fragment.playerindex;
        self.info.wall_count = fragment.wall_count;
    }

    fn apply_private(&mut self, fragment: PrivateSnapshot) {
        self.info.id = fragment.id;
        self.info.hands = fragment.hands;
        self.info.locked = fragment.locked;
        self.info.new = fragment.new;
        self.info.discarded = fragment.discarded;
        self.info.actions = fragment.actions;
    }

    /// Restore [`GameInfo`] to its zero value.
    pub fn reset_info(&mut self) {
        self.info = GameInfo::default();
    }

    /// Forget the offered reactions once the player has answered them.
    pub fn reset_actions(&mut self) {
        self.info.actions = ActionDescriptor::default();
    }

    pub fn clear_players(&mut self) {
        self.players = None;
    }

    /// Drop players and game info together.
    pub fn clear(&mut self) {
        self.clear_players();
        self.reset_info();
    }
}
