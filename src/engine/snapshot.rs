//! Protagonist-visible snapshots.
//!
//! A snapshot is what a protagonist player is allowed to see: public
//! character and location state, hand sizes, and the number of face-down
//! cards on the board. Roles and face-down targets never appear here, so a
//! UI serializing a snapshot cannot leak hidden information.

use serde::Serialize;

use crate::board::LocationKind;
use crate::core::{CardId, CharacterId, CharacterName, PlayerId};
use crate::players::PlayerKind;

use super::state::{DayPhase, Faction, GameState};

/// Public view of one location.
#[derive(Clone, Debug, Serialize)]
pub struct LocationSnapshot {
    pub kind: LocationKind,
    pub intrigue: u32,
    pub characters: Vec<CharacterId>,
}

/// Public view of one character. No role.
#[derive(Clone, Debug, Serialize)]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub name: CharacterName,
    pub location: LocationKind,
    pub goodwill: u32,
    pub paranoia: u32,
    pub intrigue: u32,
    pub alive: bool,
}

/// Public view of one player. Hands are open information in this game;
/// only face-down placements are hidden.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Vec<CardId>,
    pub once_pile: Vec<CardId>,
}

/// Everything a protagonist may observe mid-game.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub current_loop: u32,
    pub current_day: u32,
    pub current_phase: DayPhase,
    pub leader: PlayerId,
    pub game_over: bool,
    pub winner: Option<Faction>,
    /// Face-down placements are visible as a count only.
    pub placed_cards: usize,
    pub locations: Vec<LocationSnapshot>,
    pub characters: Vec<CharacterSnapshot>,
    pub players: Vec<PlayerSnapshot>,
}

impl Snapshot {
    /// Capture the public view of a game state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let locations = LocationKind::ALL
            .into_iter()
            .map(|kind| {
                let location = state.board.location(kind);
                let mut characters: Vec<_> = location.characters().collect();
                characters.sort();
                LocationSnapshot {
                    kind,
                    intrigue: location.intrigue(),
                    characters,
                }
            })
            .collect();

        let characters = state
            .roster
            .iter()
            .map(|c| CharacterSnapshot {
                id: c.id,
                name: c.data.name.clone(),
                location: c.location(),
                goodwill: c.goodwill(),
                paranoia: c.paranoia(),
                intrigue: c.intrigue(),
                alive: c.is_alive(),
            })
            .collect();

        let players = state
            .players()
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id,
                name: p.name.clone(),
                kind: p.kind,
                hand: p.hand().iter().map(|c| c.id).collect(),
                once_pile: p.once_pile().iter().map(|c| c.id).collect(),
            })
            .collect();

        Self {
            current_loop: state.current_loop,
            current_day: state.current_day,
            current_phase: state.current_phase,
            leader: state.leader,
            game_over: state.game_over,
            winner: state.winner,
            placed_cards: state.placed_card_count(),
            locations,
            characters,
            players,
        }
    }
}
