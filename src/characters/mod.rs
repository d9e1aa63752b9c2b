//! Character entity state.
//!
//! ## Key Types
//!
//! - `CharacterData` / `CharacterState` / `Character`: static data vs
//!   loop-scoped state, with clamping counter setters
//! - `Roster`: ordered ownership of every character, lookup by id or name

pub mod character;
pub mod roster;

pub use character::{Character, CharacterData, CharacterTag, GoodwillAbility};
pub use roster::Roster;
