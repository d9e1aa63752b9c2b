//! Action cards: taxonomy, priorities, targets, and per-card state.
//!
//! The card set is a closed enum so the resolution engine matches
//! exhaustively; adding a card type is a compile-time-checked change
//! everywhere it is handled. Targets are ids resolved through the roster or
//! board at apply time, never live references captured at placement.

use serde::{Deserialize, Serialize};

use crate::board::{Axis, LocationKind};
use crate::core::{CardId, CharacterId, PlayerId};

/// The suppression categories a Forbid card can register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForbidKind {
    Movement,
    Intrigue,
    Paranoia,
    Goodwill,
}

/// The closed set of action card types.
///
/// Value cards carry their signed delta; movement cards carry their axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Movement(Axis),
    ForbidMovement,
    Intrigue(i8),
    ForbidIntrigue,
    Paranoia(i8),
    ForbidParanoia,
    Goodwill(i8),
    ForbidGoodwill,
}

impl CardKind {
    /// Resolution priority. Lower resolves first:
    /// ForbidMovement(1) < Movement(2) < other Forbid(3) < value cards(4).
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            CardKind::ForbidMovement => 1,
            CardKind::Movement(_) => 2,
            CardKind::ForbidIntrigue | CardKind::ForbidParanoia | CardKind::ForbidGoodwill => 3,
            CardKind::Intrigue(_) | CardKind::Paranoia(_) | CardKind::Goodwill(_) => 4,
        }
    }

    /// The suppression category this card registers, if it is a Forbid card.
    #[must_use]
    pub const fn forbids(self) -> Option<ForbidKind> {
        match self {
            CardKind::ForbidMovement => Some(ForbidKind::Movement),
            CardKind::ForbidIntrigue => Some(ForbidKind::Intrigue),
            CardKind::ForbidParanoia => Some(ForbidKind::Paranoia),
            CardKind::ForbidGoodwill => Some(ForbidKind::Goodwill),
            _ => None,
        }
    }

    /// The suppression category that inhibits this card, if any.
    #[must_use]
    pub const fn suppressed_by(self) -> Option<ForbidKind> {
        match self {
            CardKind::Movement(_) => Some(ForbidKind::Movement),
            CardKind::Intrigue(_) => Some(ForbidKind::Intrigue),
            CardKind::Paranoia(_) => Some(ForbidKind::Paranoia),
            CardKind::Goodwill(_) => Some(ForbidKind::Goodwill),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Movement(axis) => write!(f, "Movement/{}", axis),
            CardKind::ForbidMovement => f.write_str("ForbidMovement"),
            CardKind::Intrigue(v) => write!(f, "Intrigue({:+})", v),
            CardKind::ForbidIntrigue => f.write_str("ForbidIntrigue"),
            CardKind::Paranoia(v) => write!(f, "Paranoia({:+})", v),
            CardKind::ForbidParanoia => f.write_str("ForbidParanoia"),
            CardKind::Goodwill(v) => write!(f, "Goodwill({:+})", v),
            CardKind::ForbidGoodwill => f.write_str("ForbidGoodwill"),
        }
    }
}

/// What a card is played onto: a character or a location, by stable id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Character(CharacterId),
    Location(LocationKind),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Character(id) => write!(f, "{}", id),
            Target::Location(kind) => write!(f, "Location({})", kind),
        }
    }
}

/// An action card instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    /// Once-per-loop cards go to the owner's once-pile after resolution and
    /// return to hand only at the loop boundary.
    pub once_per_loop: bool,
    pub owner: PlayerId,
    /// Bound at play time; a card without a target is not resolvable.
    pub target: Option<Target>,
    pub face_down: bool,
    pub used: bool,
}

impl Card {
    /// Create a card in a player's hand: face down, untargeted, unused.
    #[must_use]
    pub fn new(id: CardId, kind: CardKind, owner: PlayerId, once_per_loop: bool) -> Self {
        Self {
            id,
            kind,
            once_per_loop,
            owner,
            target: None,
            face_down: true,
            used: false,
        }
    }

    /// Flip the card face up.
    pub fn reveal(&mut self) {
        self.face_down = false;
    }

    /// Bind the card to a target.
    pub fn set_target(&mut self, target: Target) {
        self.target = Some(target);
    }

    /// Reset play-time state when the card returns to a hand.
    pub(crate) fn return_to_hand_state(&mut self) {
        self.target = None;
        self.face_down = true;
    }
}
