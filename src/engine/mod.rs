//! The engine: game state, the phase controller, and public snapshots.
//!
//! ## Key Types
//!
//! - `GameState`: all mutable game data, threaded through every operation
//! - `Engine`: the controller running loops, days, and phases against a
//!   `Director`
//! - `Director`: the decision seam, scripted in tests and interactive in a
//!   frontend
//! - `Snapshot`: the protagonist-visible projection of the state

pub mod controller;
pub mod snapshot;
pub mod state;

pub use controller::{Director, Engine, FinalGuess, Outcome, Placement};
pub use snapshot::{CharacterSnapshot, LocationSnapshot, PlayerSnapshot, Snapshot};
pub use state::{DayPhase, Faction, GameState, HistoryRecord};
