//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only. Entity lists are sorted by id so snapshots are stable between
//! runs with the same seed.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::*;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime};

use crate::economy::Ledger;
use crate::systems::wave_spawner::WaveDirector;

/// Everything outside the world that goes into a snapshot.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub fps: u32,
    pub selected_tower: TowerKind,
    pub ledger: &'a Ledger,
    pub director: &'a WaveDirector,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        fps: ctx.fps,
        selected_tower: ctx.selected_tower,
        economy: EconomyView {
            money: ctx.ledger.money,
            health: ctx.ledger.health,
            kills: ctx.ledger.kills,
            leaks: ctx.ledger.leaks,
        },
        wave: WaveView {
            number: ctx.director.wave,
            max_waves: ctx.director.rules().max_waves,
            phase: ctx.director.phase,
            spawned: ctx.director.spawned,
            quota: ctx.director.quota,
        },
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        events,
        game_over: ctx.phase == GamePhase::GameOver,
        victory: ctx.phase == GamePhase::Victory,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health, &PathProgress, Option<&Attacker>)>()
        .iter()
        .map(|(_, (enemy, pos, health, progress, attacker))| EnemyView {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            health_fraction: health_fraction(health.current, health.max),
            path_index: progress.index,
            attacking: attacker.is_some_and(|a| a.attacking),
        })
        .collect();
    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position, &Health)>()
        .iter()
        .map(|(_, (tower, pos, health))| TowerView {
            tower_id: tower.id,
            kind: tower.kind,
            cell: tower.cell,
            position: *pos,
            level: tower.level,
            damage: tower.damage,
            range: tower.range,
            fire_rate_ms: tower.fire_rate_ms,
            splash_radius: tower.splash_radius,
            upgrade_cost: tower.upgrade_cost,
            health: health.current,
            max_health: health.max,
            health_fraction: health_fraction(health.current, health.max),
        })
        .collect();
    towers.sort_by_key(|t| t.tower_id);
    towers
}

/// Projectiles have no id; they are listed oldest first by source tower.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u32, u32, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (projectile, pos))| {
            (
                entity.id(),
                projectile.source,
                ProjectileView {
                    position: *pos,
                    target: projectile.target,
                    splash_radius: projectile.splash_radius,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(entity, source, _)| (*source, *entity));
    projectiles.into_iter().map(|(_, _, view)| view).collect()
}
