//! Per-type stat tables for enemies and towers.
//!
//! These are the single source of truth for type-specific constants. Systems
//! read a stat record once at spawn/placement time and store it on the entity.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind};
use crate::types::floor_scaled;

/// Enemy stats for a given wave level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    /// Units per tick.
    pub speed: f64,
    pub reward: u32,
    pub attack: Option<AttackProfile>,
}

/// Melee-ish attack an enemy makes against nearby towers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub damage: u32,
    pub range: f64,
    /// Minimum interval between attacks.
    pub rate_ms: u32,
}

/// Base tower stats at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: u32,
    pub range: f64,
    /// Minimum interval between shots.
    pub fire_rate_ms: u32,
    pub cost: u32,
    pub health: i32,
    /// Zero for single-target towers.
    pub splash_radius: f64,
}

impl EnemyKind {
    /// Stats scaled by `level`, the zero-based wave index.
    pub fn stats(self, level: u32) -> EnemyStats {
        let w = level as f64;
        match self {
            EnemyKind::Basic => EnemyStats {
                health: floor_scaled(50.0, 1.0 + 0.25 * w) as i32,
                speed: 1.0 + 0.05 * w,
                reward: floor_scaled(10.0, 1.0 + 0.2 * w) as u32,
                attack: Some(AttackProfile {
                    damage: 8,
                    range: 35.0,
                    rate_ms: 1200,
                }),
            },
            EnemyKind::Fast => EnemyStats {
                health: floor_scaled(30.0, 1.0 + 0.2 * w) as i32,
                speed: 2.0 + 0.1 * w,
                reward: floor_scaled(15.0, 1.0 + 0.3 * w) as u32,
                attack: Some(AttackProfile {
                    damage: 5,
                    range: 30.0,
                    rate_ms: 1000,
                }),
            },
            EnemyKind::Tank => EnemyStats {
                health: floor_scaled(100.0, 1.0 + 0.3 * w) as i32,
                speed: (0.5 - 0.02 * w).max(0.2),
                reward: floor_scaled(25.0, 1.0 + 0.4 * w) as u32,
                attack: Some(AttackProfile {
                    damage: 15,
                    range: 40.0,
                    rate_ms: 1500,
                }),
            },
        }
    }
}

impl TowerKind {
    pub const ALL: [TowerKind; 3] = [TowerKind::Basic, TowerKind::Sniper, TowerKind::Splash];

    pub fn stats(self) -> TowerStats {
        match self {
            TowerKind::Basic => TowerStats {
                damage: 10,
                range: 100.0,
                fire_rate_ms: 1000,
                cost: 50,
                health: 100,
                splash_radius: 0.0,
            },
            TowerKind::Sniper => TowerStats {
                damage: 40,
                range: 200.0,
                fire_rate_ms: 2000,
                cost: 100,
                health: 150,
                splash_radius: 0.0,
            },
            TowerKind::Splash => TowerStats {
                damage: 15,
                range: 80.0,
                fire_rate_ms: 1500,
                cost: 120,
                health: 120,
                splash_radius: 50.0,
            },
        }
    }

    /// Purchase price.
    pub fn cost(self) -> u32 {
        self.stats().cost
    }
}
