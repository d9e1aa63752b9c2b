//! The board graph: topology, loop reset, and movement resolution.

use log::debug;
use rustc_hash::FxHashMap;

use crate::core::{CharacterId, EngineError};

use super::location::{Axis, Location, LocationKind};

/// The game board: four locations and their axis-specific adjacency.
///
/// Characters are owned by the roster; the board only indexes who stands
/// where. `reset` is idempotent and is called at the start of every loop.
#[derive(Clone, Debug)]
pub struct Board {
    locations: FxHashMap<LocationKind, Location>,
}

impl Board {
    /// Create a board with the reference topology and no occupants.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            locations: FxHashMap::default(),
        };
        board.rebuild_graph();
        board
    }

    /// Rebuild the location graph and place every character at its starting
    /// location. Idempotent; called at the top of every loop.
    pub fn reset<I>(&mut self, starting_positions: I)
    where
        I: IntoIterator<Item = (CharacterId, LocationKind)>,
    {
        self.rebuild_graph();
        for (id, start) in starting_positions {
            self.location_mut(start).add_character(id);
            debug!("placed {} at starting location {}", id, start);
        }
        debug!("board reset complete");
    }

    /// Zero the intrigue counter on every location (loop reset step).
    pub fn reset_counters(&mut self) {
        for loc in self.locations.values_mut() {
            loc.set_intrigue(0);
        }
    }

    /// Get a location.
    #[must_use]
    pub fn location(&self, kind: LocationKind) -> &Location {
        &self.locations[&kind]
    }

    /// Get a location mutably.
    pub fn location_mut(&mut self, kind: LocationKind) -> &mut Location {
        self.locations.get_mut(&kind).expect("all locations exist")
    }

    /// Resolve "move one step along `axis`" from a location.
    ///
    /// Fails with `AmbiguousOrMissingPath` when the axis has zero or two
    /// neighbors: that is a board-authoring error and is surfaced loudly
    /// rather than silently resolved.
    pub fn movement_target(
        &self,
        from: LocationKind,
        axis: Axis,
    ) -> Result<LocationKind, EngineError> {
        let loc = self.location(from);
        let path_error = EngineError::AmbiguousOrMissingPath { from, axis };

        let (a, b) = match axis {
            Axis::Horizontal => (loc.left, loc.right),
            Axis::Vertical => (loc.top, loc.bottom),
            Axis::Diagonal => (loc.diagonal, None),
        };

        match (a, b) {
            (Some(target), None) | (None, Some(target)) => Ok(target),
            _ => Err(path_error),
        }
    }

    /// Re-index a character that moved between locations.
    pub(crate) fn relocate(&mut self, id: CharacterId, from: LocationKind, to: LocationKind) {
        self.location_mut(from).remove_character(id);
        self.location_mut(to).add_character(id);
    }

    /// Whether two locations share an edge on any axis.
    #[must_use]
    pub fn is_adjacent(&self, a: LocationKind, b: LocationKind) -> bool {
        let loc = self.location(a);
        [loc.left, loc.right, loc.top, loc.bottom, loc.diagonal]
            .into_iter()
            .flatten()
            .any(|n| n == b)
    }

    /// Reference topology: Hospital-Shrine horizontal, Hospital-City
    /// vertical, Hospital-School diagonal, City-School horizontal,
    /// School-Shrine vertical, City-Shrine diagonal.
    fn rebuild_graph(&mut self) {
        for kind in LocationKind::ALL {
            self.locations.insert(kind, Location::default());
        }

        {
            let hospital = self.location_mut(LocationKind::Hospital);
            hospital.right = Some(LocationKind::Shrine);
            hospital.bottom = Some(LocationKind::City);
            hospital.diagonal = Some(LocationKind::School);
        }
        {
            let city = self.location_mut(LocationKind::City);
            city.right = Some(LocationKind::School);
            city.top = Some(LocationKind::Hospital);
            city.diagonal = Some(LocationKind::Shrine);
        }
        {
            let school = self.location_mut(LocationKind::School);
            school.left = Some(LocationKind::City);
            school.top = Some(LocationKind::Shrine);
            school.diagonal = Some(LocationKind::Hospital);
        }
        {
            let shrine = self.location_mut(LocationKind::Shrine);
            shrine.right = Some(LocationKind::Hospital);
            shrine.bottom = Some(LocationKind::School);
            shrine.diagonal = Some(LocationKind::City);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
