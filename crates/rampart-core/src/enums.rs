//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Balanced walker.
    #[default]
    Basic,
    /// Fragile and quick.
    Fast,
    /// Slow, heavily armored, high bounty.
    Tank,
}

/// Tower archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Cheap all-rounder.
    #[default]
    Basic,
    /// Long range, heavy hits, slow reload.
    Sniper,
    /// Area damage around the impact point.
    Splash,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation is not advancing; commands are still accepted.
    #[default]
    Paused,
    /// Ticks advance the world.
    Running,
    /// Player health reached zero.
    GameOver,
    /// Every wave was cleared.
    Victory,
}

impl GamePhase {
    /// Game-over and victory are final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Per-wave lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the player to start the wave.
    #[default]
    Idle,
    /// Spawning and/or enemies still alive.
    InProgress,
    /// Final wave cleared. Nothing more will spawn.
    Complete,
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementIssue {
    /// The cell lies on the enemy route.
    OnPath,
    /// The cell lies outside the grid.
    OutOfBounds,
}

impl std::fmt::Display for PlacementIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementIssue::OnPath => write!(f, "cell is on the enemy path"),
            PlacementIssue::OutOfBounds => write!(f, "cell is outside the grid"),
        }
    }
}
