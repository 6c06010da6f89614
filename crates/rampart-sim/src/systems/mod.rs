//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only). They run in the order the engine calls them; each one
//! finishes its removals before the next starts.

pub mod cleanup;
pub mod enemies;
pub mod projectiles;
pub mod snapshot;
pub mod towers;
pub mod wave_spawner;
