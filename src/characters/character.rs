//! Character static data and runtime state.
//!
//! A character splits into immutable `CharacterData` (authored by the
//! scenario) and mutable `CharacterState` (reset at every loop boundary).
//! The three counters are only writable through the clamping setters:
//! goodwill and paranoia saturate into `[0, cap]`, intrigue into `[0, ∞)`.
//! Out-of-range writes are saturation events, never errors.

use serde::{Deserialize, Serialize};

use crate::board::LocationKind;
use crate::core::{CharacterId, CharacterName, EngineError};
use crate::roles::Role;

/// A tag on a character (e.g. "Student", "Girl"), used by scenario rules.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterTag(pub String);

impl From<&str> for CharacterTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

/// A goodwill-triggered ability printed on a character card.
///
/// Only the descriptor lives at the engine layer; the concrete effect bodies
/// are scenario content invoked through the role-ability machinery.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoodwillAbility {
    pub name: String,
    /// Goodwill required to invoke the ability.
    pub cost: u32,
    /// Whether the mastermind may refuse it.
    pub refusable: bool,
}

/// Immutable, scenario-authored character data.
#[derive(Clone, Debug)]
pub struct CharacterData {
    pub name: CharacterName,
    pub tags: Vec<CharacterTag>,
    pub start_location: LocationKind,
    /// Locations this character never enters; a movement effect toward one
    /// leaves the character in place.
    pub forbidden_locations: Vec<LocationKind>,
    pub goodwill_limit: u32,
    pub paranoia_limit: u32,
    pub goodwill_abilities: Vec<GoodwillAbility>,
}

impl CharacterData {
    /// Create character data with empty tags, restrictions, and abilities.
    pub fn new(
        name: impl Into<CharacterName>,
        start_location: LocationKind,
        goodwill_limit: u32,
        paranoia_limit: u32,
    ) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            start_location,
            forbidden_locations: Vec::new(),
            goodwill_limit,
            paranoia_limit,
            goodwill_abilities: Vec::new(),
        }
    }

    /// Add tags (builder pattern).
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = CharacterTag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Forbid entry to locations (builder pattern).
    #[must_use]
    pub fn with_forbidden(mut self, locations: impl IntoIterator<Item = LocationKind>) -> Self {
        self.forbidden_locations.extend(locations);
        self
    }

    /// Add a goodwill ability descriptor (builder pattern).
    #[must_use]
    pub fn with_goodwill_ability(mut self, ability: GoodwillAbility) -> Self {
        self.goodwill_abilities.push(ability);
        self
    }

    /// Whether the character carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &CharacterTag) -> bool {
        self.tags.contains(tag)
    }
}

/// Mutable character state, reset at every loop boundary.
#[derive(Clone, Debug)]
pub struct CharacterState {
    current_location: LocationKind,
    goodwill: u32,
    paranoia: u32,
    intrigue: u32,
    alive: bool,
}

/// A character: static data, loop-scoped state, and a secret role.
///
/// The role is assigned once at scenario load and never reassigned; loop
/// resets preserve it.
#[derive(Clone, Debug)]
pub struct Character {
    pub id: CharacterId,
    pub data: CharacterData,
    state: CharacterState,
    role: Role,
}

impl Character {
    /// Construct a character at its starting location with zeroed counters.
    #[must_use]
    pub fn new(id: CharacterId, data: CharacterData, role: Role) -> Self {
        let state = CharacterState {
            current_location: data.start_location,
            goodwill: 0,
            paranoia: 0,
            intrigue: 0,
            alive: true,
        };
        Self {
            id,
            data,
            state,
            role,
        }
    }

    /// The character's name.
    #[must_use]
    pub fn name(&self) -> &CharacterName {
        &self.data.name
    }

    /// The character's secret role.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    // === Location ===

    /// Current location.
    #[must_use]
    pub fn location(&self) -> LocationKind {
        self.state.current_location
    }

    /// Whether the character may enter the given location.
    #[must_use]
    pub fn can_move_to(&self, location: LocationKind) -> bool {
        !self.data.forbidden_locations.contains(&location)
    }

    pub(crate) fn set_location(&mut self, location: LocationKind) {
        self.state.current_location = location;
    }

    // === Counters (all writes clamp) ===

    /// Current goodwill.
    #[must_use]
    pub fn goodwill(&self) -> u32 {
        self.state.goodwill
    }

    /// Set goodwill, saturating into `[0, goodwill_limit]`.
    pub fn set_goodwill(&mut self, value: i64) {
        self.state.goodwill = clamp(value, self.data.goodwill_limit);
    }

    /// Add a signed delta to goodwill, saturating into `[0, goodwill_limit]`.
    pub fn add_goodwill(&mut self, delta: i64) {
        self.set_goodwill(self.state.goodwill as i64 + delta);
    }

    /// Current paranoia.
    #[must_use]
    pub fn paranoia(&self) -> u32 {
        self.state.paranoia
    }

    /// Set paranoia, saturating into `[0, paranoia_limit]`.
    pub fn set_paranoia(&mut self, value: i64) {
        self.state.paranoia = clamp(value, self.data.paranoia_limit);
    }

    /// Add a signed delta to paranoia, saturating into `[0, paranoia_limit]`.
    pub fn add_paranoia(&mut self, delta: i64) {
        self.set_paranoia(self.state.paranoia as i64 + delta);
    }

    /// Current intrigue.
    #[must_use]
    pub fn intrigue(&self) -> u32 {
        self.state.intrigue
    }

    /// Set intrigue, saturating below zero. No upper bound.
    pub fn set_intrigue(&mut self, value: i64) {
        self.state.intrigue = value.max(0) as u32;
    }

    /// Add a signed delta to intrigue, saturating below zero.
    pub fn add_intrigue(&mut self, delta: i64) {
        self.set_intrigue(self.state.intrigue as i64 + delta);
    }

    /// Whether the character has enough goodwill to pay a cost.
    #[must_use]
    pub fn has_sufficient_goodwill(&self, cost: u32) -> bool {
        self.state.goodwill >= cost
    }

    /// Whether paranoia has reached its cap.
    #[must_use]
    pub fn paranoia_at_limit(&self) -> bool {
        self.state.paranoia >= self.data.paranoia_limit
    }

    // === Alive flag ===

    /// Whether the character is alive this loop.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state.alive
    }

    /// Kill the character. Killing the dead is an error.
    pub fn kill(&mut self) -> Result<(), EngineError> {
        if !self.state.alive {
            return Err(EngineError::AlreadyDead(self.id));
        }
        self.state.alive = false;
        Ok(())
    }

    /// Revive the character. Reviving the living is an error.
    pub fn revive(&mut self) -> Result<(), EngineError> {
        if self.state.alive {
            return Err(EngineError::NotDead(self.id));
        }
        self.state.alive = true;
        Ok(())
    }

    // === Loop reset ===

    /// Reset loop-scoped state: back to the starting location, counters at
    /// zero, alive again. The role is kept: deaths are loop-scoped, role
    /// assignments are not.
    pub fn reset_state(&mut self) {
        self.state = CharacterState {
            current_location: self.data.start_location,
            goodwill: 0,
            paranoia: 0,
            intrigue: 0,
            alive: true,
        };
    }
}

fn clamp(value: i64, cap: u32) -> u32 {
    value.clamp(0, cap as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{Role, RoleKind};
    use proptest::prelude::*;

    fn test_character() -> Character {
        Character::new(
            CharacterId::new(0),
            CharacterData::new("Boy Student", LocationKind::School, 4, 3)
                .with_tags([CharacterTag::from("Student")]),
            Role::new(RoleKind::new("Person"), "Person"),
        )
    }

    #[test]
    fn test_goodwill_clamps_to_cap() {
        let mut ch = test_character();
        ch.add_goodwill(10);
        assert_eq!(ch.goodwill(), 4);

        ch.add_goodwill(-100);
        assert_eq!(ch.goodwill(), 0);
    }

    #[test]
    fn test_paranoia_clamps_to_cap() {
        let mut ch = test_character();
        ch.set_paranoia(99);
        assert_eq!(ch.paranoia(), 3);
        assert!(ch.paranoia_at_limit());
    }

    #[test]
    fn test_intrigue_is_unbounded_above() {
        let mut ch = test_character();
        ch.add_intrigue(1_000);
        assert_eq!(ch.intrigue(), 1_000);

        ch.add_intrigue(-2_000);
        assert_eq!(ch.intrigue(), 0);
    }

    #[test]
    fn test_kill_and_revive() {
        let mut ch = test_character();
        ch.kill().unwrap();
        assert!(!ch.is_alive());
        assert_eq!(ch.kill(), Err(EngineError::AlreadyDead(ch.id)));

        ch.revive().unwrap();
        assert!(ch.is_alive());
        assert_eq!(ch.revive(), Err(EngineError::NotDead(ch.id)));
    }

    #[test]
    fn test_reset_state_revives_and_rewinds() {
        let mut ch = test_character();
        ch.add_goodwill(3);
        ch.add_paranoia(2);
        ch.add_intrigue(1);
        ch.set_location(LocationKind::City);
        ch.kill().unwrap();

        ch.reset_state();

        assert!(ch.is_alive());
        assert_eq!(ch.location(), LocationKind::School);
        assert_eq!(ch.goodwill(), 0);
        assert_eq!(ch.paranoia(), 0);
        assert_eq!(ch.intrigue(), 0);
        // Role survives the reset.
        assert_eq!(ch.role().kind, RoleKind::new("Person"));
    }

    #[test]
    fn test_movement_restrictions() {
        let data = CharacterData::new("Shrine Maiden", LocationKind::Shrine, 5, 4)
            .with_forbidden([LocationKind::City]);
        let ch = Character::new(
            CharacterId::new(1),
            data,
            Role::new(RoleKind::new("Person"), "Person"),
        );

        assert!(!ch.can_move_to(LocationKind::City));
        assert!(ch.can_move_to(LocationKind::Hospital));
    }

    proptest! {
        /// Any sequence of deltas leaves every counter within bounds.
        #[test]
        fn prop_counters_stay_in_bounds(deltas in prop::collection::vec(-50i64..50, 0..32)) {
            let mut ch = test_character();
            for d in deltas {
                ch.add_goodwill(d);
                ch.add_paranoia(d);
                ch.add_intrigue(d);

                prop_assert!(ch.goodwill() <= ch.data.goodwill_limit);
                prop_assert!(ch.paranoia() <= ch.data.paranoia_limit);
                // u32 return type already guarantees >= 0 for all three.
            }
        }
    }
}
