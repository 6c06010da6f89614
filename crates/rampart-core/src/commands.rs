//! Player commands sent from the UI layer to the simulation.
//!
//! Commands can be applied immediately through the engine's methods or
//! queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::TowerId;
use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Build a tower on a grid cell. Uses the selected tower type when
    /// `kind` is omitted.
    PlaceTower {
        x: i32,
        y: i32,
        #[serde(default)]
        kind: Option<TowerKind>,
    },
    /// Upgrade an existing tower by one level.
    UpgradeTower { tower_id: TowerId },
    /// Set the pending placement type.
    SelectTowerType { kind: TowerKind },
    /// Begin spawning the current wave.
    StartWave,
    /// Toggle tick advancement.
    SetRunning { running: bool },
}
