//! Bundled scenario content.
//!
//! Scenarios are plain functions returning a `Script`. The engine knows
//! nothing about any particular scenario; everything here is expressed
//! through the `script` and `roles` interfaces.

pub mod first_steps;

pub use first_steps::first_steps;
