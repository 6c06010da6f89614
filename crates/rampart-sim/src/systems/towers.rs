//! Tower system: removes destroyed towers and fires at the nearest enemy.
//!
//! A shot captures the target's position at fire time. The projectile flies
//! to that point whether or not the enemy is still there.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::events::GameEvent;
use rampart_core::types::{cooldown_ready, Position};

use crate::systems::cleanup;
use crate::targeting::nearest_in_range;
use crate::world_setup;

/// A shot decided during the pass, spawned once the pass is over.
struct Shot {
    origin: Position,
    target: Position,
    damage: u32,
    splash_radius: f64,
    source: TowerId,
}

/// Run the tower pass.
pub fn run(
    world: &mut World,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let enemies = enemy_targets(world);

    let mut order: Vec<(TowerId, Entity)> = world
        .query::<&Tower>()
        .iter()
        .map(|(entity, tower)| (tower.id, entity))
        .collect();
    order.sort_by_key(|(id, _)| *id);

    let mut shots: Vec<Shot> = Vec::new();

    for (tower_id, entity) in order {
        let Ok((tower, position, health)) =
            world.query_one_mut::<(&mut Tower, &Position, &Health)>(entity)
        else {
            continue;
        };

        if health.current <= 0 {
            events.push(GameEvent::TowerDestroyed { tower_id });
            tracing::debug!(tower_id, "tower destroyed");
            despawn_buffer.push(entity);
            continue;
        }

        if !cooldown_ready(tower.last_fire_ms, now_ms, tower.fire_rate_ms) {
            continue;
        }

        let candidates = enemies.iter().map(|(_, pos)| (*pos, *pos));
        if let Some((target, _)) = nearest_in_range(position, tower.range, candidates) {
            tower.last_fire_ms = Some(now_ms);
            shots.push(Shot {
                origin: *position,
                target,
                damage: tower.damage,
                splash_radius: tower.splash_radius,
                source: tower_id,
            });
        }
    }

    cleanup::run(world, despawn_buffer);

    for shot in shots {
        world_setup::spawn_projectile(
            world,
            shot.origin,
            shot.target,
            shot.damage,
            shot.splash_radius,
            shot.source,
        );
        events.push(GameEvent::TowerFired {
            tower_id: shot.source,
            target: shot.target,
        });
    }
}

/// Live enemy positions, in spawn order.
fn enemy_targets(world: &World) -> Vec<(EnemyId, Position)> {
    let mut enemies: Vec<(EnemyId, Position)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (enemy, pos))| (enemy.id, *pos))
        .collect();
    enemies.sort_by_key(|(id, _)| *id);
    enemies
}
