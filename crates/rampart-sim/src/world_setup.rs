//! Entity spawn factories.
//!
//! Creates enemies, towers, and projectiles with the component bundles the
//! systems expect. Stats are read from the per-type tables once, here.

use hecs::World;

use rampart_core::components::*;
use rampart_core::constants::PROJECTILE_SPEED;
use rampart_core::enums::*;
use rampart_core::grid::{GridCell, GridSpec, Path};
use rampart_core::types::{Position, Velocity};

/// Spawn an enemy at the start of the route. Returns `None` for an empty route.
pub fn spawn_enemy(
    world: &mut World,
    path: &Path,
    id: EnemyId,
    kind: EnemyKind,
    wave_level: u32,
) -> Option<hecs::Entity> {
    let start = path.waypoint(0)?;
    Some(spawn_enemy_at(world, id, kind, wave_level, start, 0))
}

/// Spawn an enemy at an arbitrary point, walking toward waypoint `path_index`.
pub fn spawn_enemy_at(
    world: &mut World,
    id: EnemyId,
    kind: EnemyKind,
    wave_level: u32,
    position: Position,
    path_index: usize,
) -> hecs::Entity {
    let stats = kind.stats(wave_level);
    let enemy = Enemy {
        id,
        kind,
        speed: stats.speed,
        reward: stats.reward,
        wave_level,
    };
    let health = Health {
        current: stats.health,
        max: stats.health,
    };
    let progress = PathProgress { index: path_index };

    match stats.attack {
        Some(attack) => world.spawn((
            enemy,
            position,
            health,
            progress,
            Attacker {
                damage: attack.damage,
                range: attack.range,
                rate_ms: attack.rate_ms,
                last_attack_ms: None,
                attacking: false,
            },
        )),
        None => world.spawn((enemy, position, health, progress)),
    }
}

/// Spawn a level-1 tower centered on `cell`.
pub fn spawn_tower(
    world: &mut World,
    grid: &GridSpec,
    id: TowerId,
    kind: TowerKind,
    cell: GridCell,
) -> hecs::Entity {
    let stats = kind.stats();
    world.spawn((
        Tower {
            id,
            kind,
            cell,
            damage: stats.damage,
            range: stats.range,
            fire_rate_ms: stats.fire_rate_ms,
            level: 1,
            upgrade_cost: stats.cost,
            splash_radius: stats.splash_radius,
            last_fire_ms: None,
        },
        grid.cell_center(cell),
        Health {
            current: stats.health,
            max: stats.health,
        },
    ))
}

/// Spawn a projectile flying in a straight line from `origin` to `target`.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    target: Position,
    damage: u32,
    splash_radius: f64,
    source: TowerId,
) -> hecs::Entity {
    world.spawn((
        Projectile {
            target,
            damage,
            splash_radius,
            source,
        },
        origin,
        Velocity::toward(&origin, &target, PROJECTILE_SPEED),
    ))
}
