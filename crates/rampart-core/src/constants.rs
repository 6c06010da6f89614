//! Simulation constants and tuning parameters.

use crate::grid::GridCell;

/// Simulation tick rate (Hz). One tick is one nominal animation frame.
pub const TICK_RATE: u32 = 60;

// --- World / grid ---

/// World width in units.
pub const WORLD_WIDTH: f64 = 800.0;

/// World height in units.
pub const WORLD_HEIGHT: f64 = 600.0;

/// Number of grid cells along each axis.
pub const GRID_SIZE: u32 = 20;

/// Corner cells of the default enemy route. Consecutive corners share a row
/// or a column; the route is expanded to every cell between them.
pub const DEFAULT_PATH_CORNERS: [GridCell; 8] = [
    GridCell::new(0, 3),
    GridCell::new(6, 3),
    GridCell::new(6, 10),
    GridCell::new(2, 10),
    GridCell::new(2, 16),
    GridCell::new(13, 16),
    GridCell::new(13, 6),
    GridCell::new(19, 6),
];

// --- Enemies ---

/// Distance at which an enemy snaps to its current waypoint and advances.
pub const WAYPOINT_SNAP_DISTANCE: f64 = 2.0;

/// Player lives lost per enemy that reaches the end of the route.
pub const LEAK_DAMAGE: i32 = 1;

// --- Projectiles ---

/// Projectile speed in units per tick.
pub const PROJECTILE_SPEED: f64 = 5.0;

/// A projectile closer than this to its target point has arrived.
pub const PROJECTILE_ARRIVAL_DISTANCE: f64 = 5.0;

/// Damage radius around the arrival point for non-splash projectiles.
pub const DIRECT_HIT_RADIUS: f64 = 10.0;

// --- Upgrades ---

pub const UPGRADE_DAMAGE_FACTOR: f64 = 1.3;
pub const UPGRADE_RANGE_FACTOR: f64 = 1.1;
pub const UPGRADE_FIRE_RATE_FACTOR: f64 = 0.9;
pub const UPGRADE_HEALTH_FACTOR: f64 = 1.2;
pub const UPGRADE_COST_FACTOR: f64 = 1.5;

// --- Waves ---

/// Ticks between enemy spawns within a wave (one nominal second).
pub const SPAWN_INTERVAL_TICKS: u32 = 60;

/// Enemies in the first wave.
pub const INITIAL_WAVE_QUOTA: u32 = 5;

/// Quota increase per completed wave.
pub const WAVE_QUOTA_GROWTH: u32 = 2;

/// Upper bound on the per-wave quota.
pub const MAX_WAVE_QUOTA: u32 = 15;

/// Number of waves to clear for victory.
pub const MAX_WAVES: u32 = 10;

/// Flat part of the wave completion bonus.
pub const WAVE_BONUS_BASE: u32 = 50;

/// Per-wave part of the wave completion bonus.
pub const WAVE_BONUS_PER_WAVE: u32 = 10;

// --- Economy ---

pub const STARTING_MONEY: u32 = 400;

pub const STARTING_HEALTH: i32 = 20;

// --- Display ---

/// FPS estimate refresh window (milliseconds).
pub const FPS_WINDOW_MS: f64 = 1000.0;
