//! Game state snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, TowerId};
use crate::enums::*;
use crate::events::GameEvent;
use crate::grid::GridCell;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Frames per second measured by the frame driver.
    pub fps: u32,
    /// Tower type used by placements that do not name one.
    pub selected_tower: TowerKind,
    pub economy: EconomyView,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<GameEvent>,
    pub game_over: bool,
    pub victory: bool,
}

/// Money, lives and score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub money: u32,
    pub health: i32,
    pub kills: u32,
    pub leaks: u32,
}

/// Wave progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Current wave (1-based).
    pub number: u32,
    pub max_waves: u32,
    pub phase: WavePhase,
    pub spawned: u32,
    pub quota: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    /// current / max, clamped to 0..=1.
    pub health_fraction: f64,
    pub path_index: usize,
    /// True on the tick the enemy struck a tower.
    pub attacking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub tower_id: TowerId,
    pub kind: TowerKind,
    pub cell: GridCell,
    pub position: Position,
    pub level: u32,
    pub damage: u32,
    pub range: f64,
    pub fire_rate_ms: u32,
    pub splash_radius: f64,
    pub upgrade_cost: u32,
    pub health: i32,
    pub max_health: i32,
    pub health_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub target: Position,
    pub splash_radius: f64,
}

/// Fraction of health remaining, clamped to 0..=1.
pub fn health_fraction(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    (current as f64 / max as f64).clamp(0.0, 1.0)
}
