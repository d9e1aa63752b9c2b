//! Board topology: locations, axes, adjacency, and movement resolution.
//!
//! ## Key Types
//!
//! - `LocationKind`: the closed set of board locations
//! - `Axis`: movement axes (horizontal, vertical, diagonal)
//! - `Location`: per-location runtime state (intrigue, occupants, links)
//! - `Board`: the graph plus loop-reset and movement queries

pub mod graph;
pub mod location;

pub use graph::Board;
pub use location::{Axis, Location, LocationKind};
