//! Wave director: spawn scheduling, enemy mix, and wave completion.
//!
//! Each wave goes `Idle -> InProgress` when the player starts it. While in
//! progress one enemy spawns every `spawn_interval_ticks` until the quota is
//! met; the wave completes once the quota is met and no enemy is alive.
//! Clearing the final wave moves the director to `Complete` for good.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::components::{Enemy, EnemyId};
use rampart_core::constants::*;
use rampart_core::enums::{EnemyKind, WavePhase};
use rampart_core::errors::CommandError;
use rampart_core::events::GameEvent;
use rampart_core::grid::Path;

use crate::economy::Ledger;
use crate::systems::cleanup;
use crate::world_setup;

/// Enemy mix by wave. Each gate applies from its minimum wave on; a roll is
/// checked against a gate's thresholds in order, and a later gate's match
/// replaces an earlier one. Anything unmatched is `Basic`.
const SPAWN_GATES: [(u32, &[(f64, EnemyKind)]); 3] = [
    (2, &[(0.2, EnemyKind::Fast)]),
    (4, &[(0.1, EnemyKind::Tank), (0.4, EnemyKind::Fast)]),
    (7, &[(0.2, EnemyKind::Tank), (0.5, EnemyKind::Fast)]),
];

/// Pick the enemy kind for a uniform roll `r` in `[0, 1)`.
pub fn roll_enemy_kind(wave: u32, r: f64) -> EnemyKind {
    let mut kind = EnemyKind::Basic;
    for (min_wave, thresholds) in SPAWN_GATES {
        if wave < min_wave {
            continue;
        }
        if let Some(&(_, gated)) = thresholds.iter().find(|(threshold, _)| r < *threshold) {
            kind = gated;
        }
    }
    kind
}

/// Tuning for wave size, pacing, and rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveRules {
    pub initial_quota: u32,
    pub quota_growth: u32,
    pub max_quota: u32,
    pub max_waves: u32,
    pub spawn_interval_ticks: u32,
    pub bonus_base: u32,
    pub bonus_per_wave: u32,
}

impl Default for WaveRules {
    fn default() -> Self {
        Self {
            initial_quota: INITIAL_WAVE_QUOTA,
            quota_growth: WAVE_QUOTA_GROWTH,
            max_quota: MAX_WAVE_QUOTA,
            max_waves: MAX_WAVES,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            bonus_base: WAVE_BONUS_BASE,
            bonus_per_wave: WAVE_BONUS_PER_WAVE,
        }
    }
}

/// What happened when a wave finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveOutcome {
    /// The next wave is ready to start; `bonus` was earned.
    Advanced { completed: u32, next: u32, bonus: u32 },
    /// The final wave was cleared.
    Victory { completed: u32 },
}

/// Per-wave state machine.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    /// Current wave (1-based).
    pub wave: u32,
    pub phase: WavePhase,
    pub quota: u32,
    pub spawned: u32,
    spawn_timer: u32,
    rules: WaveRules,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(WaveRules::default())
    }
}

impl WaveDirector {
    pub fn new(rules: WaveRules) -> Self {
        Self {
            wave: 1,
            phase: WavePhase::Idle,
            quota: rules.initial_quota,
            spawned: 0,
            spawn_timer: 0,
            rules,
        }
    }

    pub fn rules(&self) -> &WaveRules {
        &self.rules
    }

    /// Zero-based wave index used to scale enemy stats.
    pub fn level(&self) -> u32 {
        self.wave.saturating_sub(1)
    }

    pub fn is_victorious(&self) -> bool {
        self.phase == WavePhase::Complete
    }

    /// Begin the current wave. Returns the wave number.
    pub fn start(&mut self) -> Result<u32, CommandError> {
        match self.phase {
            WavePhase::InProgress => Err(CommandError::WaveInProgress),
            WavePhase::Complete => Err(CommandError::SimulationEnded),
            WavePhase::Idle => {
                self.phase = WavePhase::InProgress;
                self.spawned = 0;
                self.spawn_timer = 0;
                Ok(self.wave)
            }
        }
    }

    /// Advance the spawn timer by one tick. Returns true when an enemy is due.
    pub fn advance_spawn_timer(&mut self) -> bool {
        if self.phase != WavePhase::InProgress || self.spawned >= self.quota {
            return false;
        }
        self.spawn_timer += 1;
        if self.spawn_timer < self.rules.spawn_interval_ticks {
            return false;
        }
        self.spawn_timer = 0;
        self.spawned += 1;
        true
    }

    /// Complete the wave if the quota is spawned and nothing is left alive.
    pub fn check_completion(&mut self, live_enemies: usize) -> Option<WaveOutcome> {
        if self.phase != WavePhase::InProgress || self.spawned < self.quota || live_enemies > 0 {
            return None;
        }

        let completed = self.wave;
        if completed >= self.rules.max_waves {
            self.phase = WavePhase::Complete;
            return Some(WaveOutcome::Victory { completed });
        }

        self.wave += 1;
        self.quota = (self.quota + self.rules.quota_growth).min(self.rules.max_quota);
        self.phase = WavePhase::Idle;
        Some(WaveOutcome::Advanced {
            completed,
            next: self.wave,
            bonus: self.rules.bonus_base + self.rules.bonus_per_wave * self.wave,
        })
    }
}

/// Spawn any due enemy, then evaluate wave completion.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    path: &Path,
    next_enemy_id: &mut EnemyId,
    ledger: &mut Ledger,
    events: &mut Vec<GameEvent>,
) -> Option<WaveOutcome> {
    if director.advance_spawn_timer() {
        let kind = roll_enemy_kind(director.wave, rng.gen::<f64>());
        let enemy_id = *next_enemy_id;
        if world_setup::spawn_enemy(world, path, enemy_id, kind, director.level()).is_some() {
            *next_enemy_id += 1;
            events.push(GameEvent::EnemySpawned { enemy_id, kind });
            tracing::debug!(enemy_id, ?kind, wave = director.wave, "enemy spawned");
        }
    }

    let outcome = director.check_completion(cleanup::count::<Enemy>(world))?;
    match outcome {
        WaveOutcome::Advanced {
            completed,
            next,
            bonus,
        } => {
            ledger.credit(bonus);
            events.push(GameEvent::WaveCompleted {
                wave: completed,
                bonus,
            });
            tracing::info!(wave = completed, next, bonus, "wave complete");
        }
        WaveOutcome::Victory { completed } => {
            events.push(GameEvent::WaveCompleted {
                wave: completed,
                bonus: 0,
            });
            tracing::info!(wave = completed, "final wave cleared");
        }
    }
    Some(outcome)
}
