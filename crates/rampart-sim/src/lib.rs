//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, runs the per-tick systems in a fixed order,
//! and produces GameStateSnapshots for an external renderer.

pub mod economy;
pub mod engine;
pub mod fps;
pub mod systems;
pub mod targeting;
pub mod upgrades;
pub mod world_setup;

pub use engine::{CommandOutcome, SimConfig, SimulationEngine};
pub use rampart_core as core;
