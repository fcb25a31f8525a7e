//! Tile codec: compact tile tokens to display names and glyphs, and the
//! reactive-action menu derived from an [`ActionDescriptor`].
//!
//! Tokens are `<rank><suit>` for suited tiles (`t` sou, `o` pin, `w` man) and
//! single letters for honors (`e s w n` winds, `z f b` dragons), plus
//! `joker`, `back` and the eight flower/season tiles.
//!
//! Nothing here fails. Unknown tokens resolve to sentinels so a renderer
//! never has to handle an error:
//!
//! | input            | [`tile_name`] | [`tile_font`]          |
//! |------------------|---------------|------------------------|
//! | `""`             | `""`          | [`REPLACEMENT_GLYPH`]  |
//! | unknown token    | `"Blank"`     | [`REPLACEMENT_GLYPH`]  |
//! | known token      | e.g. `"Sou1"` | e.g. `"🀐"`            |
//!
//! The boolean "no tile" sentinel the server sometimes puts in an action slot
//! renders as an empty glyph, see [`offer_font`].

use crate::protocol::{ActionDescriptor, ActionOffer, ActionPayload, ChowPair, GameAction};

/// Name returned for a non-empty token with no table entry.
pub const BLANK_NAME: &str = "Blank";

/// Glyph returned for a token with no table entry.
pub const REPLACEMENT_GLYPH: &str = "\u{FFFD}";

fn name_of(token: &str) -> Option<&'static str> {
    let name = match token {
        "1t" => "Sou1",
        "2t" => "Sou2",
        "3t" => "Sou3",
        "4t" => "Sou4",
        "5t" => "Sou5",
        "6t" => "Sou6",
        "7t" => "Sou7",
        "8t" => "Sou8",
        "9t" => "Sou9",
        "1o" => "Pin1",
        "2o" => "Pin2",
        "3o" => "Pin3",
        "4o" => "Pin4",
        "5o" => "Pin5",
        "6o" => "Pin6",
        "7o" => "Pin7",
        "8o" => "Pin8",
        "9o" => "Pin9",
        "1w" => "Man1",
        "2w" => "Man2",
        "3w" => "Man3",
        "4w" => "Man4",
        "5w" => "Man5",
        "6w" => "Man6",
        "7w" => "Man7",
        "8w" => "Man8",
        "9w" => "Man9",
        "e" => "Ton",
        "s" => "Nan",
        "w" => "Shaa",
        "n" => "Pei",
        "z" => "Chun",
        "f" => "Hatsu",
        "b" => "Haku",
        "joker" => "Joker",
        "back" => "Back",
        _ => return None,
    };
    Some(name)
}

fn glyph_of(token: &str) -> Option<&'static str> {
    let glyph = match token {
        "1o" => "🀙",
        "2o" => "🀚",
        "3o" => "🀛",
        "4o" => "🀜",
        "5o" => "🀝",
        "6o" => "🀞",
        "7o" => "🀟",
        "8o" => "🀠",
        "9o" => "🀡",
        "1t" => "🀐",
        "2t" => "🀑",
        "3t" => "🀒",
        "4t" => "🀓",
        "5t" => "🀔",
        "6t" => "🀕",
        "7t" => "🀖",
        "8t" => "🀗",
        "9t" => "🀘",
        "1w" => "🀇",
        "2w" => "🀈",
        "3w" => "🀉",
        "4w" => "🀊",
        "5w" => "🀋",
        "6w" => "🀌",
        "7w" => "🀍",
        "8w" => "🀎",
        "9w" => "🀏",
        "e" => "🀀",
        "s" => "🀁",
        "w" => "🀂",
        "n" => "🀃",
        "b" => "🀆",
        "f" => "🀅",
        "z" => "🀄",
        "joker" => "🃏",
        "back" => "🀫",
        "spring" => "🀦",
        "summer" => "🀧",
        "autumn" => "🀨",
        "winter" => "🀩",
        "plum" => "🀢",
        "orchid" => "🀣",
        "bamboo" => "🀤",
        "chrysanthemum" => "🀥",
        _ => return None,
    };
    Some(glyph)
}

/// Canonical name of a tile: `""` for an empty token, [`BLANK_NAME`] for an
/// unknown one.
pub fn tile_name(token: &str) -> &'static str {
    if token.is_empty() {
        return "";
    }
    name_of(token).unwrap_or(BLANK_NAME)
}

pub fn tile_names<S: AsRef<str>>(tokens: &[S]) -> Vec<&'static str> {
    tokens.iter().map(|t| tile_name(t.as_ref())).collect()
}

/// Display glyph of a tile, or [`REPLACEMENT_GLYPH`] when the token is not in
/// the table. An empty token (no freshly drawn tile) also renders as the
/// replacement glyph.
pub fn tile_font(token: &str) -> &'static str {
    glyph_of(token).unwrap_or(REPLACEMENT_GLYPH)
}

pub fn tile_fonts<S: AsRef<str>>(tokens: &[S]) -> Vec<&'static str> {
    tokens.iter().map(|t| tile_font(t.as_ref())).collect()
}

/// Glyph for an action slot. A boolean slot carries no tile and renders empty.
pub fn offer_font(offer: &ActionOffer) -> &'static str {
    match offer {
        ActionOffer::Tile(tile) => tile_font(tile),
        ActionOffer::Flag(_) => "",
    }
}

// ── Reactive actions ────────────────────────────────────────────────

/// The four reactive action kinds, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Hu,
    Kong,
    Pong,
    Chow,
}

impl ActionKind {
    /// The verb printed in front of the tile glyphs in the action menu.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Hu => "胡",
            Self::Kong => "杠",
            Self::Pong => "碰",
            Self::Chow => "吃",
        }
    }
}

/// One line of the reactive-action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionChoice {
    kind: ActionKind,
    label: String,
    payload: ActionPayload,
    action: GameAction,
}

impl ActionChoice {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw value the menu hands back for this entry.
    pub fn payload(&self) -> &ActionPayload {
        &self.payload
    }

    /// The `game_action` message that submits this choice.
    pub fn game_action(&self) -> &GameAction {
        &self.action
    }
}

fn chow_label(pair: &ChowPair) -> String {
    let [first, second] = pair;
    format!(
        "{}{}{}",
        ActionKind::Chow.verb(),
        tile_font(first),
        tile_font(second)
    )
}

/// Menu entries for every offered action: hu, kong, pong, then each chow
/// pair in server order.
pub fn action_choices(actions: &ActionDescriptor) -> Vec<ActionChoice> {
    let slots = [
        (ActionKind::Hu, &actions.hu, GameAction::Hu),
        (ActionKind::Kong, &actions.kong, GameAction::Kong),
        (ActionKind::Pong, &actions.pong, GameAction::Pong),
    ];

    let mut choices: Vec<ActionChoice> = slots
        .into_iter()
        .filter(|(_, offer, _)| offer.is_offered())
        .map(|(kind, offer, action)| ActionChoice {
            kind,
            label: format!("{}{}", kind.verb(), offer_font(offer)),
            payload: ActionPayload::Confirm(true),
            action,
        })
        .collect();

    choices.extend(actions.chow.iter().map(|pair| ActionChoice {
        kind: ActionKind::Chow,
        label: chow_label(pair),
        payload: ActionPayload::Chow(pair.clone()),
        action: GameAction::Chow {
            tiles: pair.clone(),
        },
    }));
    choices
}

/// Human-readable labels, one per offered action.
pub fn action_labels(actions: &ActionDescriptor) -> Vec<String> {
    action_choices(actions)
        .into_iter()
        .map(|choice| choice.label)
        .collect()
}

/// Reply payloads, positionally matching [`action_labels`].
pub fn action_payloads(actions: &ActionDescriptor) -> Vec<ActionPayload> {
    action_choices(actions)
        .into_iter()
        .map(|choice| choice.payload)
        .collect()
}
