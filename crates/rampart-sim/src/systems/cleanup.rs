//! Deferred despawning.
//!
//! Systems never despawn while iterating a query. They push doomed entities
//! into a shared buffer and drain it once the pass is over, so no entity is
//! skipped or processed twice.

use hecs::{Entity, World};

/// Despawn every buffered entity and clear the buffer.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        // Already gone is fine: an entity may be queued by two passes.
        let _ = world.despawn(entity);
    }
}

/// Count live entities carrying component `C`.
pub fn count<C: hecs::Component>(world: &World) -> usize {
    world.query::<&C>().iter().count()
}
