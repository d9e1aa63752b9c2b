//! A deterministic rules engine for hidden-role, time-loop deduction games.
//!
//! One mastermind plays against a team of protagonists across repeated
//! loops of the same few days. Characters move around a four-location
//! board and accumulate goodwill, paranoia, and intrigue; face-down action
//! cards resolve in priority order; hidden roles fire abilities in fixed
//! timing windows; scripted incidents and plot rules decide each loop.
//! The engine is fully deterministic: all open decisions flow through the
//! [`Director`] trait, so every game is reproducible from its inputs.
//!
//! # Example
//!
//! ```no_run
//! use looper_engine::{Engine, Director, FinalGuess, GameState, Placement, PlayerId};
//! use looper_engine::scenarios::first_steps;
//!
//! struct Scripted; // placements and guess elided
//! # impl Director for Scripted {
//! #     fn mastermind_placements(&mut self, _: &GameState) -> Vec<Placement> { Vec::new() }
//! #     fn protagonist_placement(&mut self, _: &GameState, _: PlayerId) -> Placement {
//! #         unimplemented!()
//! #     }
//! #     fn final_guess(&mut self, _: &GameState) -> FinalGuess { FinalGuess::default() }
//! # }
//!
//! let mut engine = Engine::new(first_steps(), Scripted)?;
//! let outcome = engine.run()?;
//! println!("{} win after {} loops", outcome.winner, outcome.loops_played);
//! # Ok::<(), looper_engine::EngineError>(())
//! ```

pub mod board;
pub mod cards;
pub mod characters;
pub mod core;
pub mod engine;
pub mod players;
pub mod resolution;
pub mod roles;
pub mod scenarios;
pub mod script;
pub mod triggers;

pub use board::{Axis, Board, Location, LocationKind};
pub use cards::{mastermind_hand, protagonist_hand, Card, CardIdAllocator, CardKind, ForbidKind, Target};
pub use characters::{Character, CharacterData, CharacterTag, GoodwillAbility, Roster};
pub use crate::core::{CardId, CharacterId, CharacterName, EngineError, PlayerId};
pub use engine::{
    DayPhase, Director, Engine, Faction, FinalGuess, GameState, HistoryRecord, Outcome,
    Placement, Snapshot,
};
pub use players::{Player, PlayerKind};
pub use resolution::resolve_action_cards;
pub use roles::{AbilityTiming, MandatoryClass, Role, RoleAbility, RoleKind};
pub use script::{Incident, Plot, PlotKind, PlotRule, RuleKind, Script, ScriptCharacter};
pub use triggers::trigger_abilities;
