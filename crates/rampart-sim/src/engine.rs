//! Simulation engine: the Frame Stepper.
//!
//! `SimulationEngine` owns the hecs ECS world, the economy ledger and the
//! wave director. It applies player commands, runs the per-tick systems in a
//! fixed order, and produces `GameStateSnapshot`s. Completely headless, so a
//! given seed and command sequence always yields the same run.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{EnemyId, Health, Tower, TowerId};
use rampart_core::constants::*;
use rampart_core::enums::{GamePhase, PlacementIssue, TowerKind};
use rampart_core::errors::CommandError;
use rampart_core::events::GameEvent;
use rampart_core::grid::{GridCell, GridSpec, Path};
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::SimTime;

use crate::economy::Ledger;
use crate::fps::FpsMeter;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_spawner::{WaveDirector, WaveRules};
use crate::upgrades;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub starting_money: u32,
    pub starting_health: i32,
    pub initial_quota: u32,
    pub quota_growth: u32,
    pub max_quota: u32,
    pub max_waves: u32,
    pub spawn_interval_ticks: u32,
    pub wave_bonus_base: u32,
    pub wave_bonus_per_wave: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_money: STARTING_MONEY,
            starting_health: STARTING_HEALTH,
            initial_quota: INITIAL_WAVE_QUOTA,
            quota_growth: WAVE_QUOTA_GROWTH,
            max_quota: MAX_WAVE_QUOTA,
            max_waves: MAX_WAVES,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            wave_bonus_base: WAVE_BONUS_BASE,
            wave_bonus_per_wave: WAVE_BONUS_PER_WAVE,
        }
    }
}

impl SimConfig {
    pub fn wave_rules(&self) -> WaveRules {
        WaveRules {
            initial_quota: self.initial_quota,
            quota_growth: self.quota_growth,
            max_quota: self.max_quota,
            max_waves: self.max_waves,
            spawn_interval_ticks: self.spawn_interval_ticks.max(1),
            bonus_base: self.wave_bonus_base,
            bonus_per_wave: self.wave_bonus_per_wave,
        }
    }
}

/// What an accepted command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    TowerPlaced(TowerId),
    TowerUpgraded { tower_id: TowerId, level: u32 },
    TowerSelected(TowerKind),
    WaveStarted(u32),
    PhaseChanged(GamePhase),
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    grid: GridSpec,
    path: Path,
    ledger: Ledger,
    director: WaveDirector,
    selected_tower: TowerKind,
    next_enemy_id: EnemyId,
    next_tower_id: TowerId,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    fps: FpsMeter,
}

impl SimulationEngine {
    /// Create a new engine on the default grid and route.
    pub fn new(config: SimConfig) -> Self {
        let grid = GridSpec::default();
        let path = Path::from_corners(&grid, &DEFAULT_PATH_CORNERS);
        Self::with_layout(config, grid, path)
    }

    /// Create a new engine on a custom grid and route.
    pub fn with_layout(config: SimConfig, grid: GridSpec, path: Path) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            grid,
            path,
            ledger: Ledger::new(config.starting_money, config.starting_health),
            director: WaveDirector::new(config.wave_rules()),
            selected_tower: TowerKind::default(),
            next_enemy_id: 0,
            next_tower_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            fps: FpsMeter::default(),
        }
    }

    // --- Commands ---

    /// Build a tower on `(x, y)`. `None` uses the selected tower type.
    pub fn place_tower(
        &mut self,
        x: i32,
        y: i32,
        kind: Option<TowerKind>,
    ) -> Result<TowerId, CommandError> {
        self.ensure_not_ended()?;
        let cell = GridCell::new(x, y);
        if !self.grid.in_bounds(cell) {
            return Err(CommandError::InvalidPlacement {
                x,
                y,
                reason: PlacementIssue::OutOfBounds,
            });
        }
        if self.path.contains(cell) {
            return Err(CommandError::InvalidPlacement {
                x,
                y,
                reason: PlacementIssue::OnPath,
            });
        }

        let kind = kind.unwrap_or(self.selected_tower);
        self.ledger.try_spend(kind.cost())?;

        let tower_id = self.next_tower_id;
        self.next_tower_id += 1;
        world_setup::spawn_tower(&mut self.world, &self.grid, tower_id, kind, cell);
        self.events.push(GameEvent::TowerPlaced {
            tower_id,
            kind,
            cell,
        });
        tracing::debug!(tower_id, ?kind, x, y, money = self.ledger.money, "tower placed");
        Ok(tower_id)
    }

    /// Upgrade a tower by one level. Returns the new level.
    pub fn upgrade_tower(&mut self, tower_id: TowerId) -> Result<u32, CommandError> {
        self.ensure_not_ended()?;
        let entity = self
            .find_tower(tower_id)
            .ok_or(CommandError::UnknownTower(tower_id))?;

        let cost = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.upgrade_cost)
            .map_err(|_| CommandError::UnknownTower(tower_id))?;
        self.ledger.try_spend(cost)?;

        let (tower, health) = self
            .world
            .query_one_mut::<(&mut Tower, &mut Health)>(entity)
            .map_err(|_| CommandError::UnknownTower(tower_id))?;
        upgrades::apply_upgrade(tower, health);
        let level = tower.level;

        self.events.push(GameEvent::TowerUpgraded { tower_id, level });
        tracing::debug!(tower_id, level, cost, "tower upgraded");
        Ok(level)
    }

    /// Set the tower type used by placements that do not name one.
    pub fn select_tower_type(&mut self, kind: TowerKind) {
        self.selected_tower = kind;
    }

    /// Begin the current wave. Returns the wave number.
    pub fn start_wave(&mut self) -> Result<u32, CommandError> {
        self.ensure_not_ended()?;
        let wave = self.director.start()?;
        self.events.push(GameEvent::WaveStarted {
            wave,
            quota: self.director.quota,
        });
        tracing::info!(wave, quota = self.director.quota, "wave started");
        Ok(wave)
    }

    /// Run or pause tick advancement. Terminal phases stay as they are.
    pub fn set_running(&mut self, running: bool) -> GamePhase {
        if !self.phase.is_terminal() {
            self.phase = if running {
                GamePhase::Running
            } else {
                GamePhase::Paused
            };
        }
        self.phase
    }

    /// Apply a command immediately.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<CommandOutcome, CommandError> {
        match command {
            PlayerCommand::PlaceTower { x, y, kind } => {
                self.place_tower(x, y, kind).map(CommandOutcome::TowerPlaced)
            }
            PlayerCommand::UpgradeTower { tower_id } => self
                .upgrade_tower(tower_id)
                .map(|level| CommandOutcome::TowerUpgraded { tower_id, level }),
            PlayerCommand::SelectTowerType { kind } => {
                self.select_tower_type(kind);
                Ok(CommandOutcome::TowerSelected(kind))
            }
            PlayerCommand::StartWave => self.start_wave().map(CommandOutcome::WaveStarted),
            PlayerCommand::SetRunning { running } => {
                Ok(CommandOutcome::PhaseChanged(self.set_running(running)))
            }
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Record a rendered frame at a monotonic timestamp (milliseconds).
    pub fn observe_frame(&mut self, timestamp_ms: f64) {
        self.fps.observe(timestamp_ms);
    }

    // --- Stepping ---

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Queued commands are applied first. While paused or ended the world is
    /// left untouched and the clock does not move.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, self.snapshot_context(), events)
    }

    /// Current state without stepping. Pending events stay queued.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, self.snapshot_context(), Vec::new())
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn selected_tower(&self) -> TowerKind {
        self.selected_tower
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    #[cfg(test)]
    pub fn director_mut(&mut self) -> &mut WaveDirector {
        &mut self.director
    }

    /// Spawn a wave-1 enemy at an arbitrary point (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: rampart_core::enums::EnemyKind,
        position: rampart_core::types::Position,
        path_index: usize,
    ) -> hecs::Entity {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        world_setup::spawn_enemy_at(&mut self.world, id, kind, 0, position, path_index)
    }

    // --- Internals ---

    fn ensure_not_ended(&self) -> Result<(), CommandError> {
        if self.phase.is_terminal() {
            return Err(CommandError::SimulationEnded);
        }
        Ok(())
    }

    fn find_tower(&self, tower_id: TowerId) -> Option<hecs::Entity> {
        self.world
            .query::<&Tower>()
            .iter()
            .find(|(_, tower)| tower.id == tower_id)
            .map(|(entity, _)| entity)
    }

    fn snapshot_context(&self) -> SnapshotContext<'_> {
        SnapshotContext {
            time: self.time,
            phase: self.phase,
            fps: self.fps.fps(),
            selected_tower: self.selected_tower,
            ledger: &self.ledger,
            director: &self.director,
        }
    }

    /// Apply every queued command. Rejections become events.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.apply_command(command) {
                tracing::debug!(%err, "queued command rejected");
                self.events.push(GameEvent::CommandRejected {
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.elapsed_ms();

        // 1. Enemies: move, attack towers, die or leak
        systems::enemies::run(
            &mut self.world,
            &self.path,
            now_ms,
            &mut self.ledger,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 2. Towers: remove destroyed, fire
        systems::towers::run(
            &mut self.world,
            now_ms,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 3. Projectiles: fly, impact
        systems::projectiles::run(&mut self.world, &mut self.events, &mut self.despawn_buffer);
        // 4-5. Wave spawning and completion
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.director,
            &self.path,
            &mut self.next_enemy_id,
            &mut self.ledger,
            &mut self.events,
        );
        // 6. Terminal conditions
        self.check_terminal();
    }

    fn check_terminal(&mut self) {
        if self.ledger.is_defeated() {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            tracing::info!(
                wave = self.director.wave,
                kills = self.ledger.kills,
                "game over"
            );
        } else if self.director.is_victorious() {
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory);
            tracing::info!(
                health = self.ledger.health,
                kills = self.ledger.kills,
                "victory"
            );
        }
    }
}
