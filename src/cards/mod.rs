//! Card model: taxonomy, priorities, targets, starting hands.
//!
//! ## Key Types
//!
//! - `CardKind`: closed enum of the eight card types, with priorities and
//!   suppression categories
//! - `Target`: character-or-location sum type, bound at play time
//! - `Card`: a card instance with owner, face and used flags
//! - `CardIdAllocator` and the fixed starting hands

pub mod card;
pub mod hands;

pub use card::{Card, CardKind, ForbidKind, Target};
pub use hands::{mastermind_hand, protagonist_hand, CardIdAllocator};
