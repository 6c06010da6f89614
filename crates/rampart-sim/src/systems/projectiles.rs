//! Projectile system: straight-line flight and impact resolution.
//!
//! On arrival a projectile damages every enemy near its target point: within
//! its splash radius for splash shots, within `DIRECT_HIT_RADIUS` otherwise.
//! Damage lands on whoever is there now, not on the enemy originally aimed at.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, Projectile};
use rampart_core::constants::{DIRECT_HIT_RADIUS, PROJECTILE_ARRIVAL_DISTANCE};
use rampart_core::events::GameEvent;
use rampart_core::types::{Position, Velocity};

use crate::systems::cleanup;
use crate::targeting::within_radius;

/// An arrived projectile awaiting damage resolution.
struct Impact {
    point: Position,
    damage: u32,
    radius: f64,
}

/// Radius around the arrival point that takes damage.
pub fn impact_radius(splash_radius: f64) -> f64 {
    if splash_radius > 0.0 {
        splash_radius
    } else {
        DIRECT_HIT_RADIUS
    }
}

/// Run the projectile pass.
pub fn run(world: &mut World, events: &mut Vec<GameEvent>, despawn_buffer: &mut Vec<Entity>) {
    let mut impacts: Vec<Impact> = Vec::new();

    for (entity, (pos, vel, projectile)) in
        world.query_mut::<(&mut Position, &Velocity, &Projectile)>()
    {
        pos.x += vel.x;
        pos.y += vel.y;

        if pos.distance_to(&projectile.target) < PROJECTILE_ARRIVAL_DISTANCE {
            impacts.push(Impact {
                point: projectile.target,
                damage: projectile.damage,
                radius: impact_radius(projectile.splash_radius),
            });
            despawn_buffer.push(entity);
        }
    }

    cleanup::run(world, despawn_buffer);

    if impacts.is_empty() {
        return;
    }

    let mut enemies: Vec<(u32, Entity, Position)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(entity, (enemy, pos))| (enemy.id, entity, *pos))
        .collect();
    enemies.sort_by_key(|(id, _, _)| *id);

    for impact in impacts {
        let candidates = enemies.iter().map(|(_, entity, pos)| (*entity, *pos));
        let hits = within_radius(&impact.point, impact.radius, candidates);
        for &entity in &hits {
            if let Ok(mut health) = world.get::<&mut Health>(entity) {
                health.current = health.current.saturating_sub(impact.damage as i32);
            }
        }
        events.push(GameEvent::ProjectileImpact {
            position: impact.point,
            hits: hits.len() as u32,
        });
    }
}
