//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::grid::GridCell;
use crate::types::Position;

/// Stable identifier for an enemy, assigned in spawn order.
pub type EnemyId = u32;

/// Stable identifier for a tower, assigned in placement order.
pub type TowerId = u32;

/// Hit points shared by enemies and towers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Enemy identity and the wave-scaled stats captured at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    /// Units per tick.
    pub speed: f64,
    pub reward: u32,
    /// Zero-based wave index the stats were scaled by.
    pub wave_level: u32,
}

/// Progress along the enemy route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index of the waypoint the enemy is walking toward.
    pub index: usize,
}

/// Attack capability of an enemy against towers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attacker {
    pub damage: u32,
    pub range: f64,
    pub rate_ms: u32,
    /// Sim time of the last attack, if any.
    pub last_attack_ms: Option<u64>,
    /// Set on the tick an attack lands, cleared on the next tick.
    pub attacking: bool,
}

/// A placed tower and its current (possibly upgraded) stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub cell: GridCell,
    pub damage: u32,
    pub range: f64,
    pub fire_rate_ms: u32,
    pub level: u32,
    pub upgrade_cost: u32,
    /// Zero for single-target towers.
    pub splash_radius: f64,
    /// Sim time of the last shot, if any.
    pub last_fire_ms: Option<u64>,
}

/// A shot in flight toward a fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Where the target stood when the shot was fired.
    pub target: Position,
    pub damage: u32,
    pub splash_radius: f64,
    /// Tower that fired the shot.
    pub source: TowerId,
}
