//! Secret roles and their abilities.
//!
//! A role is bound to exactly one character at scenario load, is hidden from
//! the protagonist players, and survives loop resets. Abilities are plain
//! data descriptors (a timing window, a mandatory classification, and two
//! fn pointers) rather than closures, so nothing aliases the character that
//! carries them.

use serde::{Deserialize, Serialize};

use crate::core::{CharacterId, EngineError};
use crate::engine::GameState;

/// Role type tag (e.g. "Killer", "KeyPerson"). Open set: scenarios author
/// their own role vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleKind(pub String);

impl RoleKind {
    /// Create a role kind tag.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Timing window in which an ability may fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTiming {
    DayStart,
    DayEnd,
    LoopStart,
    LoopEnd,
    CardResolve,
    MastermindPhase,
    CharacterDeath,
    GoodwillUse,
    IncidentTrigger,
    Always,
}

/// Mandatory classification of an ability.
///
/// `Must` abilities always fire when triggerable. `Optional` abilities may
/// be skipped by player choice (a decision left to the caller, not modeled
/// here). `MandatoryRefusal` is preserved as a distinct bucket even though
/// its execution currently matches `Must`: the tabletop source never wires
/// up a separate path for it, so the engine keeps it as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MandatoryClass {
    Must,
    Optional,
    MandatoryRefusal,
}

/// Triggerability predicate. Must be side-effect-free.
pub type AbilityTrigger = fn(&GameState, CharacterId) -> Result<bool, EngineError>;

/// Ability effect, applied to the game state on behalf of the actor.
pub type AbilityEffect = fn(&mut GameState, CharacterId) -> Result<(), EngineError>;

/// A role ability descriptor.
#[derive(Clone, Debug)]
pub struct RoleAbility {
    pub name: String,
    pub timing: AbilityTiming,
    pub class: MandatoryClass,
    pub trigger: AbilityTrigger,
    pub effect: AbilityEffect,
}

impl RoleAbility {
    /// Create an ability descriptor.
    pub fn new(
        name: impl Into<String>,
        timing: AbilityTiming,
        class: MandatoryClass,
        trigger: AbilityTrigger,
        effect: AbilityEffect,
    ) -> Self {
        Self {
            name: name.into(),
            timing,
            class,
            trigger,
            effect,
        }
    }
}

/// A secret role: a type tag, a display name, and its abilities.
#[derive(Clone, Debug)]
pub struct Role {
    pub kind: RoleKind,
    pub name: String,
    pub abilities: Vec<RoleAbility>,
}

impl Role {
    /// Create a role with no abilities.
    pub fn new(kind: RoleKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            abilities: Vec::new(),
        }
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: RoleAbility) -> Self {
        self.abilities.push(ability);
        self
    }
}

/// Trigger that always holds. Convenience for scenario authoring.
pub fn always(_state: &GameState, _actor: CharacterId) -> Result<bool, EngineError> {
    Ok(true)
}

/// Trigger that never holds. For abilities that are pure authoring labels.
pub fn never(_state: &GameState, _actor: CharacterId) -> Result<bool, EngineError> {
    Ok(false)
}

/// Effect that does nothing. For abilities whose bodies are business content
/// outside the engine.
pub fn no_effect(_state: &mut GameState, _actor: CharacterId) -> Result<(), EngineError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_builder() {
        let role = Role::new(RoleKind::new("Brain"), "Brain").with_ability(RoleAbility::new(
            "Add intrigue",
            AbilityTiming::MastermindPhase,
            MandatoryClass::Optional,
            always,
            no_effect,
        ));

        assert_eq!(role.kind, RoleKind::new("Brain"));
        assert_eq!(role.abilities.len(), 1);
        assert_eq!(role.abilities[0].class, MandatoryClass::Optional);
    }

    #[test]
    fn test_role_kind_display() {
        assert_eq!(format!("{}", RoleKind::new("KeyPerson")), "KeyPerson");
    }
}
