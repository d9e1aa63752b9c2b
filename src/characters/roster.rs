//! The character roster.
//!
//! Owns every character for the lifetime of a game. Iteration order is
//! authoring order, which the trigger sweep and several scenario rules rely
//! on for determinism.

use crate::core::{CharacterId, CharacterName, EngineError};
use crate::roles::Role;

use super::character::{Character, CharacterData};

/// Ordered collection of all characters in play.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a character, assigning the next id in roster order.
    pub fn add(&mut self, data: CharacterData, role: Role) -> CharacterId {
        let id = CharacterId::new(self.characters.len() as u32);
        self.characters.push(Character::new(id, data, role));
        id
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Look up a character by id.
    pub fn get(&self, id: CharacterId) -> Result<&Character, EngineError> {
        self.characters
            .get(id.index())
            .ok_or(EngineError::UnknownCharacter(id))
    }

    /// Look up a character mutably by id.
    pub fn get_mut(&mut self, id: CharacterId) -> Result<&mut Character, EngineError> {
        self.characters
            .get_mut(id.index())
            .ok_or(EngineError::UnknownCharacter(id))
    }

    /// Look up a character by name.
    pub fn by_name(&self, name: &CharacterName) -> Result<&Character, EngineError> {
        self.characters
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| EngineError::UnknownCharacterName(name.0.clone()))
    }

    /// Iterate characters in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Iterate characters mutably in roster order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    /// Starting positions of every character, for the board reset.
    pub fn starting_positions(
        &self,
    ) -> impl Iterator<Item = (CharacterId, crate::board::LocationKind)> + '_ {
        self.characters
            .iter()
            .map(|c| (c.id, c.data.start_location))
    }

    /// Reset every character's loop-scoped state.
    pub fn reset_all(&mut self) {
        for character in &mut self.characters {
            character.reset_state();
        }
    }
}
