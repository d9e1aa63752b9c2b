//! Engine error taxonomy.
//!
//! Three families of failure exist in this engine:
//!
//! 1. **Configuration errors**: malformed topology, a script missing
//!    required roles, a card resolved with an unbound or mistyped target.
//!    These are fatal to setup or to the current resolution pass.
//! 2. **Rule violations**: placement quota misses, a second final guess.
//!    Reported to the controller, which decides whether to re-prompt or end
//!    the game.
//! 3. **Saturation events**: counter writes outside bounds. These are NOT
//!    errors; counters clamp silently, mirroring the physical token tracks.
//!
//! Lower layers return errors upward; only the phase controller decides
//! fatality.

use thiserror::Error;

use super::ids::{CardId, CharacterId, PlayerId};
use crate::board::{Axis, LocationKind};
use crate::cards::{CardKind, Target};

/// Errors surfaced by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Movement along an axis found zero or two neighbors.
    ///
    /// This is a scenario-authoring error in the board graph, not a
    /// recoverable runtime condition.
    #[error("no unique {axis} neighbor from {from}")]
    AmbiguousOrMissingPath { from: LocationKind, axis: Axis },

    /// A card reached resolution without a bound target.
    #[error("{card} has no bound target")]
    UnboundTarget { card: CardId },

    /// A card's target is the wrong kind of entity for its category.
    #[error("{card} ({kind}) cannot be applied to {target}")]
    InvalidTarget {
        card: CardId,
        kind: CardKind,
        target: Target,
    },

    /// A character id did not resolve against the roster.
    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),

    /// A character name did not resolve against the roster.
    #[error("unknown character name '{0}'")]
    UnknownCharacterName(String),

    /// A player id did not resolve.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// The requested card is not in the player's hand.
    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { card: CardId, player: PlayerId },

    /// A player placed the wrong number of cards for the day.
    #[error("{player} placed {placed} cards, daily quota is {quota}")]
    PlacementQuota {
        player: PlayerId,
        placed: usize,
        quota: usize,
    },

    /// The final guess was attempted a second time.
    #[error("final guess has already been made")]
    GuessAlreadyMade,

    /// Kill requested on a character that is already dead.
    #[error("character {0} is already dead")]
    AlreadyDead(CharacterId),

    /// Revive requested on a character that is alive.
    #[error("character {0} is not dead")]
    NotDead(CharacterId),

    /// Scenario assembly handed the engine an invalid script.
    #[error("invalid script: {0}")]
    Script(String),
}
