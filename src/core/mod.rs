//! Core engine types: identifiers and the error taxonomy.
//!
//! Everything else in the crate builds on these. Identifiers are small Copy
//! newtypes; errors are a single closed enum propagated up to the phase
//! controller, which is the only layer that decides fatality.

pub mod error;
pub mod ids;

pub use error::EngineError;
pub use ids::{CardId, CharacterId, CharacterName, PlayerId};
