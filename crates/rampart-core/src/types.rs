//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// 2D position in world units (x = right, y = down, origin at the top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
///
/// Time is driven purely by the tick counter so that rate gating is
/// deterministic and independent of the wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Move toward `target` by at most `step` units. Returns the new position.
    pub fn step_toward(&self, target: &Position, step: f64) -> Position {
        let delta = target.as_vec() - self.as_vec();
        let dist = delta.length();
        if dist <= step || dist == 0.0 {
            return *target;
        }
        Position::from_vec(self.as_vec() + delta / dist * step)
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` pointing from `from` to `to`.
    /// Coincident points yield a zero velocity.
    pub fn toward(from: &Position, to: &Position, speed: f64) -> Self {
        let dir = (to.as_vec() - from.as_vec()).normalize_or_zero() * speed;
        Self { x: dir.x, y: dir.y }
    }

    /// Speed magnitude (units per tick).
    pub fn speed(&self) -> f64 {
        DVec2::new(self.x, self.y).length()
    }
}

impl SimTime {
    /// Elapsed simulation time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.tick * 1000 / TICK_RATE as u64
    }

    /// Elapsed simulation time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Returns true when an action with the given cooldown may fire now.
/// An action that has never fired is always ready.
pub fn cooldown_ready(last_ms: Option<u64>, now_ms: u64, cooldown_ms: u32) -> bool {
    match last_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= cooldown_ms as u64,
    }
}

/// `floor(value * factor)`, tolerant of binary representation error in
/// `factor` so that e.g. `floor(100 * 1.2)` is 120.
pub fn floor_scaled(value: f64, factor: f64) -> f64 {
    (value * factor + 1e-9).floor()
}
