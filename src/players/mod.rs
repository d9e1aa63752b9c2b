//! Players: the mastermind and the protagonists.
//!
//! A player owns a hand and a once-pile. Cards move between hand, board, and
//! once-pile by value; the engine routes them at resolution and loop-reset
//! time. The per-day placement quota (mastermind 3, protagonist 1) is
//! enforced by the phase controller.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{CardId, EngineError, PlayerId};

/// Which side a player is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Mastermind,
    Protagonist,
}

/// A player and their cards.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    hand: Vec<Card>,
    once_pile: Vec<Card>,
}

impl Player {
    /// Create a player with a starting hand.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind, hand: Vec<Card>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            hand,
            once_pile: Vec::new(),
        }
    }

    /// Cards the player must place each day.
    #[must_use]
    pub fn daily_quota(&self) -> usize {
        match self.kind {
            PlayerKind::Mastermind => 3,
            PlayerKind::Protagonist => 1,
        }
    }

    /// The player's hand.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// The player's used once-per-loop cards.
    #[must_use]
    pub fn once_pile(&self) -> &[Card] {
        &self.once_pile
    }

    /// Remove a card from the hand for placement.
    pub fn take_from_hand(&mut self, card_id: CardId) -> Result<Card, EngineError> {
        match self.hand.iter().position(|c| c.id == card_id) {
            Some(pos) => Ok(self.hand.remove(pos)),
            None => Err(EngineError::CardNotInHand {
                card: card_id,
                player: self.id,
            }),
        }
    }

    /// Return a resolved card. Once-per-loop cards go to the once-pile and
    /// stay there until the loop boundary; everything else goes back to hand.
    pub fn return_card(&mut self, mut card: Card) {
        card.return_to_hand_state();
        if card.once_per_loop {
            card.used = true;
            self.once_pile.push(card);
        } else {
            self.hand.push(card);
        }
    }

    /// Loop boundary: move every once-pile card back to hand, unused.
    pub fn reclaim_once_cards(&mut self) {
        for mut card in self.once_pile.drain(..) {
            card.used = false;
            self.hand.push(card);
        }
    }
}
