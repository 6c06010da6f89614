//! Enemy system: movement along the route, attacks on towers, and removal.
//!
//! Per enemy, in spawn order: step toward the current waypoint (or advance
//! to the next one), strike the nearest tower in reach if the attack is off
//! cooldown, then resolve removal. Death is checked before reaching the end,
//! so an enemy that is both dead and at the exit counts as a kill.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::constants::WAYPOINT_SNAP_DISTANCE;
use rampart_core::events::GameEvent;
use rampart_core::grid::Path;
use rampart_core::types::{cooldown_ready, Position};

use crate::economy::Ledger;
use crate::systems::cleanup;
use crate::targeting::nearest_in_range;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still walking the route.
    Moving,
    /// Arrived at the final waypoint.
    ReachedEnd,
}

/// Move an enemy one tick along the route.
///
/// Within `WAYPOINT_SNAP_DISTANCE` of the current waypoint the enemy advances
/// its index instead of moving, which keeps it from oscillating around the
/// waypoint center.
pub fn advance_along_path(
    position: &mut Position,
    progress: &mut PathProgress,
    speed: f64,
    path: &Path,
) -> Advance {
    let Some(waypoint) = path.waypoint(progress.index) else {
        return Advance::ReachedEnd;
    };

    if position.distance_to(&waypoint) < WAYPOINT_SNAP_DISTANCE {
        if progress.index >= path.last_index() {
            return Advance::ReachedEnd;
        }
        progress.index += 1;
        return Advance::Moving;
    }

    *position = position.step_toward(&waypoint, speed);
    Advance::Moving
}

/// Run the enemy pass.
pub fn run(
    world: &mut World,
    path: &Path,
    now_ms: u64,
    ledger: &mut Ledger,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let towers = tower_targets(world);

    let mut order: Vec<(EnemyId, Entity)> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, enemy)| (enemy.id, entity))
        .collect();
    order.sort_by_key(|(id, _)| *id);

    // (target tower, damage) applied after the pass.
    let mut strikes: Vec<(Entity, EnemyId, TowerId, u32)> = Vec::new();

    for (enemy_id, entity) in order {
        let Ok((enemy, position, progress, health, attacker)) = world
            .query_one_mut::<(
                &Enemy,
                &mut Position,
                &mut PathProgress,
                &Health,
                Option<&mut Attacker>,
            )>(entity)
        else {
            continue;
        };

        let advance = advance_along_path(position, progress, enemy.speed, path);

        if let Some(attacker) = attacker {
            attacker.attacking = false;
            let ready = cooldown_ready(attacker.last_attack_ms, now_ms, attacker.rate_ms);
            if advance == Advance::Moving && ready {
                let candidates = towers.iter().map(|t| (t, t.2));
                if let Some(((tower_entity, tower_id, _), _)) =
                    nearest_in_range(position, attacker.range, candidates)
                {
                    attacker.last_attack_ms = Some(now_ms);
                    attacker.attacking = true;
                    strikes.push((*tower_entity, enemy_id, *tower_id, attacker.damage));
                }
            }
        }

        if health.current <= 0 {
            ledger.record_kill(enemy.reward);
            events.push(GameEvent::EnemyKilled {
                enemy_id,
                kind: enemy.kind,
                reward: enemy.reward,
            });
            tracing::debug!(enemy_id, reward = enemy.reward, "enemy killed");
            despawn_buffer.push(entity);
        } else if advance == Advance::ReachedEnd {
            ledger.record_leak();
            events.push(GameEvent::EnemyLeaked { enemy_id });
            tracing::debug!(enemy_id, health = ledger.health, "enemy reached the exit");
            despawn_buffer.push(entity);
        }
    }

    for (tower_entity, enemy_id, tower_id, damage) in strikes {
        if let Ok(mut health) = world.get::<&mut Health>(tower_entity) {
            health.current = health.current.saturating_sub(damage as i32);
        }
        events.push(GameEvent::EnemyAttackedTower {
            enemy_id,
            tower_id,
            damage,
        });
    }

    cleanup::run(world, despawn_buffer);
}

/// Towers as attack candidates, in placement order.
fn tower_targets(world: &World) -> Vec<(Entity, TowerId, Position)> {
    let mut towers: Vec<(Entity, TowerId, Position)> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(entity, (tower, pos))| (entity, tower.id, *pos))
        .collect();
    towers.sort_by_key(|(_, id, _)| *id);
    towers
}
