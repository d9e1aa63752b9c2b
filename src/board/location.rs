//! Locations and movement axes.
//!
//! The board is a fixed set of four locations connected by at most one edge
//! per movement axis. A location tracks its own intrigue counter and an
//! index of the characters standing on it; the roster owns the characters,
//! the location merely references them by id.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::CharacterId;

/// The fixed set of board locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Hospital,
    City,
    School,
    Shrine,
}

impl LocationKind {
    /// All locations, in display order.
    pub const ALL: [LocationKind; 4] = [
        LocationKind::Hospital,
        LocationKind::City,
        LocationKind::School,
        LocationKind::Shrine,
    ];
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocationKind::Hospital => "Hospital",
            LocationKind::City => "City",
            LocationKind::School => "School",
            LocationKind::Shrine => "Shrine",
        };
        f.write_str(name)
    }
}

/// Movement axis for movement cards.
///
/// Adjacency is undirected but axis-specific: a location has at most one
/// left/right pair, one top/bottom pair, and one diagonal partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::Horizontal => "Horizontal",
            Axis::Vertical => "Vertical",
            Axis::Diagonal => "Diagonal",
        };
        f.write_str(name)
    }
}

/// Runtime state of one board location.
#[derive(Clone, Debug, Default)]
pub struct Location {
    /// Intrigue counter. No upper bound; writes below zero saturate at zero.
    intrigue: u32,

    /// Characters currently standing here, by id.
    characters: FxHashSet<CharacterId>,

    // Neighbor slots, one per axis direction. Two filled slots on the same
    // axis (or none) make that axis unusable for movement.
    pub(crate) left: Option<LocationKind>,
    pub(crate) right: Option<LocationKind>,
    pub(crate) top: Option<LocationKind>,
    pub(crate) bottom: Option<LocationKind>,
    pub(crate) diagonal: Option<LocationKind>,
}

impl Location {
    /// Current intrigue on this location.
    #[must_use]
    pub fn intrigue(&self) -> u32 {
        self.intrigue
    }

    /// Set intrigue, saturating below zero.
    pub fn set_intrigue(&mut self, value: i64) {
        self.intrigue = value.max(0) as u32;
    }

    /// Add a signed delta to intrigue, saturating below zero.
    pub fn add_intrigue(&mut self, delta: i64) {
        self.set_intrigue(self.intrigue as i64 + delta);
    }

    /// Characters currently at this location.
    pub fn characters(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.characters.iter().copied()
    }

    /// Whether the given character is at this location.
    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.contains(&id)
    }

    /// Number of characters indexed here.
    #[must_use]
    pub fn occupant_count(&self) -> usize {
        self.characters.len()
    }

    pub(crate) fn add_character(&mut self, id: CharacterId) {
        self.characters.insert(id);
    }

    pub(crate) fn remove_character(&mut self, id: CharacterId) {
        self.characters.remove(&id);
    }
}
