//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, TowerId};
use crate::enums::*;
use crate::grid::GridCell;
use crate::types::Position;

/// Something notable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned {
        enemy_id: EnemyId,
        kind: EnemyKind,
    },
    EnemyKilled {
        enemy_id: EnemyId,
        kind: EnemyKind,
        reward: u32,
    },
    /// Enemy walked off the end of the route.
    EnemyLeaked { enemy_id: EnemyId },
    EnemyAttackedTower {
        enemy_id: EnemyId,
        tower_id: TowerId,
        damage: u32,
    },
    TowerPlaced {
        tower_id: TowerId,
        kind: TowerKind,
        cell: GridCell,
    },
    TowerUpgraded { tower_id: TowerId, level: u32 },
    TowerDestroyed { tower_id: TowerId },
    TowerFired {
        tower_id: TowerId,
        target: Position,
    },
    /// A projectile arrived; `hits` enemies took damage.
    ProjectileImpact { position: Position, hits: u32 },
    WaveStarted { wave: u32, quota: u32 },
    WaveCompleted { wave: u32, bonus: u32 },
    Victory,
    GameOver,
    /// A queued command was refused.
    CommandRejected { reason: String },
}
