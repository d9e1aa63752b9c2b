//! Starting hands.
//!
//! The deal is fixed by the base game: the mastermind holds ten cards,
//! each protagonist seven. Once-per-loop copies are the diagonal movement
//! card, the +2 intrigue card, and the +2 goodwill card.

use crate::board::Axis;
use crate::core::{CardId, PlayerId};

use super::card::{Card, CardKind};

/// Allocates card ids sequentially across the whole game setup.
#[derive(Debug, Default)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next card id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId::new(self.next);
        self.next += 1;
        id
    }
}

/// The mastermind's starting hand.
pub fn mastermind_hand(owner: PlayerId, ids: &mut CardIdAllocator) -> Vec<Card> {
    let deal: [(CardKind, bool); 10] = [
        (CardKind::Movement(Axis::Horizontal), false),
        (CardKind::Movement(Axis::Vertical), false),
        (CardKind::Movement(Axis::Diagonal), true),
        (CardKind::Paranoia(1), false),
        (CardKind::Paranoia(1), false),
        (CardKind::Paranoia(-1), false),
        (CardKind::Intrigue(1), false),
        (CardKind::Intrigue(2), true),
        (CardKind::ForbidGoodwill, false),
        (CardKind::ForbidParanoia, false),
    ];

    deal.into_iter()
        .map(|(kind, once)| Card::new(ids.alloc(), kind, owner, once))
        .collect()
}

/// A protagonist's starting hand.
pub fn protagonist_hand(owner: PlayerId, ids: &mut CardIdAllocator) -> Vec<Card> {
    let deal: [(CardKind, bool); 7] = [
        (CardKind::Movement(Axis::Horizontal), false),
        (CardKind::Movement(Axis::Vertical), false),
        (CardKind::Paranoia(1), false),
        (CardKind::Paranoia(-1), false),
        (CardKind::Goodwill(1), false),
        (CardKind::Goodwill(2), true),
        (CardKind::ForbidMovement, false),
    ];

    deal.into_iter()
        .map(|(kind, once)| Card::new(ids.alloc(), kind, owner, once))
        .collect()
}
