//! The renderer seam.
//!
//! The engine never draws. Whatever presents the game implements `Renderer`
//! and receives every snapshot the loop produces.

use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;

pub trait Renderer: Send {
    fn render(&mut self, snapshot: &GameStateSnapshot);
}

/// Logs a one-line HUD every `interval_ticks` sim ticks, plus rejected commands.
pub struct TraceRenderer {
    interval_ticks: u64,
    last_logged_tick: Option<u64>,
}

impl TraceRenderer {
    pub fn new(interval_ticks: u64) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            last_logged_tick: None,
        }
    }

    fn due(&self, tick: u64) -> bool {
        tick % self.interval_ticks == 0 && self.last_logged_tick != Some(tick)
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            if let GameEvent::CommandRejected { reason } = event {
                tracing::warn!(%reason, "command rejected");
            }
        }

        let tick = snapshot.time.tick;
        if !self.due(tick) {
            return;
        }
        self.last_logged_tick = Some(tick);
        tracing::info!(
            tick,
            fps = snapshot.fps,
            money = snapshot.economy.money,
            health = snapshot.economy.health,
            kills = snapshot.economy.kills,
            wave = snapshot.wave.number,
            spawned = snapshot.wave.spawned,
            quota = snapshot.wave.quota,
            enemies = snapshot.enemies.len(),
            towers = snapshot.towers.len(),
            "hud"
        );
    }
}

/// Discards everything.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &GameStateSnapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_renderer_logs_once_per_interval() {
        let mut renderer = TraceRenderer::new(60);
        assert!(renderer.due(0));
        renderer.last_logged_tick = Some(0);
        assert!(!renderer.due(0), "paused ticks repeat and log once");
        assert!(!renderer.due(59));
        assert!(renderer.due(120));
    }
}
