//! Game state: the single mutable context threaded through every operation.
//!
//! One `GameState` lives for the duration of one game. All counter mutation
//! goes through the entity setters so the clamping invariants hold; the
//! state only adds coordination that spans entities (movement re-indexing,
//! card placement, history).

use im::Vector;
use log::debug;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Axis, Board, LocationKind};
use crate::cards::{Card, Target};
use crate::characters::{Character, Roster};
use crate::core::{CardId, CharacterId, EngineError, PlayerId};
use crate::players::{Player, PlayerKind};

/// The nine phases of one in-game day, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    DayStart,
    MastermindAction,
    ProtagonistsAction,
    ResolveCards,
    MastermindAbilities,
    LeaderGoodwill,
    Incidents,
    SwitchLeader,
    DayEnd,
}

impl DayPhase {
    /// The full day cycle, in execution order.
    pub const CYCLE: [DayPhase; 9] = [
        DayPhase::DayStart,
        DayPhase::MastermindAction,
        DayPhase::ProtagonistsAction,
        DayPhase::ResolveCards,
        DayPhase::MastermindAbilities,
        DayPhase::LeaderGoodwill,
        DayPhase::Incidents,
        DayPhase::SwitchLeader,
        DayPhase::DayEnd,
    ];
}

impl std::fmt::Display for DayPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DayPhase::DayStart => "DayStart",
            DayPhase::MastermindAction => "MastermindAction",
            DayPhase::ProtagonistsAction => "ProtagonistsAction",
            DayPhase::ResolveCards => "ResolveCards",
            DayPhase::MastermindAbilities => "MastermindAbilities",
            DayPhase::LeaderGoodwill => "LeaderGoodwill",
            DayPhase::Incidents => "Incidents",
            DayPhase::SwitchLeader => "SwitchLeader",
            DayPhase::DayEnd => "DayEnd",
        };
        f.write_str(name)
    }
}

/// The two sides of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Mastermind,
    Protagonists,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Mastermind => f.write_str("Mastermind"),
            Faction::Protagonists => f.write_str("Protagonists"),
        }
    }
}

/// An entry in the append-only game history.
///
/// The history is the observability channel for the UI layer; it is never
/// consulted by the rules themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRecord {
    LoopPrepared { loop_number: u32 },
    PhaseStarted { loop_number: u32, day: u32, phase: DayPhase },
    CardApplied { card: CardId, owner: PlayerId },
    CardSuppressed { card: CardId },
    AbilityExecuted { ability: String, actor: CharacterId },
    IncidentOccurred { name: String, day: u32 },
    CharacterDied { character: CharacterId },
    LeaderChanged { leader: PlayerId },
    GameEnded { winner: Faction },
}

/// Complete game state for one game instance.
pub struct GameState {
    pub current_loop: u32,
    pub current_day: u32,
    pub current_phase: DayPhase,
    pub max_loops: u32,
    pub days_per_loop: u32,

    pub board: Board,
    pub roster: Roster,
    players: Vec<Player>,
    /// The protagonist currently leading.
    pub leader: PlayerId,

    /// Cards placed face-down this day, in placement order.
    placed_cards: SmallVec<[Card; 8]>,

    pub game_over: bool,
    pub winner: Option<Faction>,
    pub guess_made: bool,
    /// Set when the protagonists lose the current loop; ends the day cycle
    /// early without ending the game.
    pub loop_failed: bool,

    occurred_incidents: FxHashSet<String>,
    pub history: Vector<HistoryRecord>,
}

impl GameState {
    /// Create a game state. Player 0 must be the mastermind; the first
    /// protagonist starts as leader.
    #[must_use]
    pub fn new(roster: Roster, players: Vec<Player>, max_loops: u32, days_per_loop: u32) -> Self {
        let leader = players
            .iter()
            .find(|p| p.kind == PlayerKind::Protagonist)
            .map(|p| p.id)
            .unwrap_or(PlayerId::new(1));

        let mut board = Board::new();
        board.reset(roster.starting_positions());

        Self {
            current_loop: 0,
            current_day: 0,
            current_phase: DayPhase::DayStart,
            max_loops,
            days_per_loop,
            board,
            roster,
            players,
            leader,
            placed_cards: SmallVec::new(),
            game_over: false,
            winner: None,
            guess_made: false,
            loop_failed: false,
            occurred_incidents: FxHashSet::default(),
            history: Vector::new(),
        }
    }

    // === Players ===

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.players
            .get(id.index())
            .ok_or(EngineError::UnknownPlayer(id))
    }

    /// Look up a player mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.players
            .get_mut(id.index())
            .ok_or(EngineError::UnknownPlayer(id))
    }

    /// All players, mastermind first.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Ids of the protagonist players, in seating order.
    pub fn protagonist_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|p| p.kind == PlayerKind::Protagonist)
            .map(|p| p.id)
    }

    // === Characters and movement ===

    /// Characters currently at a location, in roster order.
    pub fn characters_at(&self, location: LocationKind) -> impl Iterator<Item = &Character> {
        self.roster.iter().filter(move |c| c.location() == location)
    }

    /// Alive characters currently at a location, in roster order.
    pub fn alive_characters_at(&self, location: LocationKind) -> impl Iterator<Item = &Character> {
        self.characters_at(location).filter(|c| c.is_alive())
    }

    /// Find the character holding a role kind, if any.
    #[must_use]
    pub fn character_with_role(&self, kind: &crate::roles::RoleKind) -> Option<&Character> {
        self.roster.iter().find(|c| &c.role().kind == kind)
    }

    /// Move a character one step along an axis.
    ///
    /// Returns `Ok(false)` without moving when the destination is on the
    /// character's forbidden list; propagates `AmbiguousOrMissingPath` for a
    /// malformed axis.
    pub fn move_character_along(
        &mut self,
        id: CharacterId,
        axis: Axis,
    ) -> Result<bool, EngineError> {
        let from = self.roster.get(id)?.location();
        let to = self.board.movement_target(from, axis)?;
        self.move_character_to(id, to)
    }

    /// Move a character to a specific location, respecting its restrictions.
    pub fn move_character_to(
        &mut self,
        id: CharacterId,
        to: LocationKind,
    ) -> Result<bool, EngineError> {
        let character = self.roster.get(id)?;
        let from = character.location();
        if !character.can_move_to(to) {
            debug!("{} refuses to enter {}", character.name(), to);
            return Ok(false);
        }
        self.board.relocate(id, from, to);
        self.roster.get_mut(id)?.set_location(to);
        debug!("{} moved {} -> {}", id, from, to);
        Ok(true)
    }

    /// Kill a character and record it. Killing the dead is an error.
    pub fn kill_character(&mut self, id: CharacterId) -> Result<(), EngineError> {
        self.roster.get_mut(id)?.kill()?;
        self.record(HistoryRecord::CharacterDied { character: id });
        Ok(())
    }

    // === Card placement ===

    /// Bind a target to a card from the player's hand and place it face down
    /// on the board.
    ///
    /// Placement order is preserved only as a stable-sort tiebreaker; no
    /// target information is observable until the reveal step of resolution.
    pub fn place_card(
        &mut self,
        player: PlayerId,
        card_id: CardId,
        target: Target,
    ) -> Result<(), EngineError> {
        let mut card = self.player_mut(player)?.take_from_hand(card_id)?;
        card.set_target(target);
        debug_assert!(card.face_down);
        self.placed_cards.push(card);
        Ok(())
    }

    /// Number of cards currently placed on the board.
    #[must_use]
    pub fn placed_card_count(&self) -> usize {
        self.placed_cards.len()
    }

    /// Drain the placed cards for resolution, in placement order.
    pub(crate) fn take_placed_cards(&mut self) -> SmallVec<[Card; 8]> {
        std::mem::take(&mut self.placed_cards)
    }

    /// Return all cards to their owners: anything still on the board, then
    /// every once-pile back to hand. Loop-boundary step.
    pub fn return_all_cards(&mut self) -> Result<(), EngineError> {
        let placed = self.take_placed_cards();
        for card in placed {
            let owner = card.owner;
            self.player_mut(owner)?.return_card(card);
        }
        for player in &mut self.players {
            player.reclaim_once_cards();
        }
        Ok(())
    }

    /// Loop boundary: advance the loop counter and rewind everything else
    /// (cards back to hands, characters to starting state, board counters
    /// to zero). Roles survive; the history does not rewind.
    pub fn begin_loop(&mut self) -> Result<(), EngineError> {
        self.current_loop += 1;
        self.current_day = 0;
        self.current_phase = DayPhase::DayStart;
        self.loop_failed = false;
        self.occurred_incidents.clear();
        self.return_all_cards()?;
        self.roster.reset_all();
        self.board.reset_counters();
        self.board.reset(self.roster.starting_positions());
        let loop_number = self.current_loop;
        debug!("loop {} prepared", loop_number);
        self.record(HistoryRecord::LoopPrepared { loop_number });
        Ok(())
    }

    // === Incidents and history ===

    /// Record that an incident fired.
    pub fn record_incident(&mut self, name: &str) {
        self.occurred_incidents.insert(name.to_string());
        let day = self.current_day;
        self.record(HistoryRecord::IncidentOccurred {
            name: name.to_string(),
            day,
        });
    }

    /// Whether an incident has fired this loop.
    #[must_use]
    pub fn incident_occurred(&self, name: &str) -> bool {
        self.occurred_incidents.contains(name)
    }

    /// Append to the game history.
    pub fn record(&mut self, record: HistoryRecord) {
        self.history.push_back(record);
    }

    /// Declare a winner and end the game. Game-over is monotonic.
    pub fn set_winner(&mut self, winner: Faction) {
        self.winner = Some(winner);
        self.game_over = true;
        self.record(HistoryRecord::GameEnded { winner });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{protagonist_hand, CardIdAllocator};
    use crate::characters::CharacterData;
    use crate::roles::{Role, RoleKind};

    fn small_state() -> GameState {
        let mut roster = Roster::new();
        roster.add(
            CharacterData::new("Boy Student", LocationKind::School, 4, 3),
            Role::new(RoleKind::new("Person"), "Person"),
        );
        roster.add(
            CharacterData::new("Shrine Maiden", LocationKind::Shrine, 5, 4)
                .with_forbidden([LocationKind::City]),
            Role::new(RoleKind::new("Person"), "Person"),
        );

        let mut ids = CardIdAllocator::new();
        let p1 = PlayerId::new(1);
        let players = vec![
            Player::new(
                PlayerId::MASTERMIND,
                "Mastermind",
                PlayerKind::Mastermind,
                Vec::new(),
            ),
            Player::new(p1, "Protagonist-A", PlayerKind::Protagonist, protagonist_hand(p1, &mut ids)),
        ];

        GameState::new(roster, players, 3, 3)
    }

    #[test]
    fn test_movement_updates_board_index() {
        let mut state = small_state();
        let id = CharacterId::new(0);

        // School's vertical neighbor is the Shrine.
        let moved = state.move_character_along(id, Axis::Vertical).unwrap();
        assert!(moved);
        assert_eq!(
            state.roster.get(id).unwrap().location(),
            LocationKind::Shrine
        );
        assert!(state.board.location(LocationKind::Shrine).contains(id));
        assert!(!state.board.location(LocationKind::School).contains(id));
    }

    #[test]
    fn test_restricted_move_is_inert() {
        let mut state = small_state();
        let maiden = CharacterId::new(1);

        // Shrine's diagonal neighbor is the City, which the maiden refuses.
        let moved = state.move_character_along(maiden, Axis::Diagonal).unwrap();
        assert!(!moved);
        assert_eq!(
            state.roster.get(maiden).unwrap().location(),
            LocationKind::Shrine
        );
    }

    #[test]
    fn test_kill_records_history() {
        let mut state = small_state();
        let id = CharacterId::new(0);

        state.kill_character(id).unwrap();
        assert!(!state.roster.get(id).unwrap().is_alive());
        assert!(state
            .history
            .iter()
            .any(|r| *r == HistoryRecord::CharacterDied { character: id }));

        assert!(state.kill_character(id).is_err());
    }

    #[test]
    fn test_place_card_moves_it_out_of_hand() {
        let mut state = small_state();
        let p1 = PlayerId::new(1);
        let card_id = state.player(p1).unwrap().hand()[0].id;

        state
            .place_card(p1, card_id, Target::Character(CharacterId::new(0)))
            .unwrap();

        assert_eq!(state.placed_card_count(), 1);
        assert_eq!(state.player(p1).unwrap().hand().len(), 6);
    }

    #[test]
    fn test_return_all_cards() {
        let mut state = small_state();
        let p1 = PlayerId::new(1);
        let card_id = state.player(p1).unwrap().hand()[0].id;
        state
            .place_card(p1, card_id, Target::Character(CharacterId::new(0)))
            .unwrap();

        state.return_all_cards().unwrap();
        assert_eq!(state.placed_card_count(), 0);
        assert_eq!(state.player(p1).unwrap().hand().len(), 7);
    }
}
