//! Game loop: runs the simulation engine at 60 Hz and renders snapshots.
//!
//! `spawn_game_loop` creates the engine inside a dedicated thread. Commands
//! arrive via `mpsc` channel; snapshots go to the renderer and into shared
//! state for polling. `run_headless` steps the same engine on the calling
//! thread without sleeping.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rampart_core::commands::PlayerCommand;
use rampart_core::constants::TICK_RATE;
use rampart_core::enums::WavePhase;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::{SimConfig, SimulationEngine};

use crate::config::AppError;
use crate::render::Renderer;
use crate::script::CommandScript;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the caller to use.
pub fn spawn_game_loop(
    config: SimConfig,
    renderer: Box<dyn Renderer>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<mpsc::Sender<GameLoopCommand>, AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || {
            run_game_loop(config, renderer, cmd_rx, &latest_snapshot);
        })
        .map_err(AppError::Spawn)?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    mut renderer: Box<dyn Renderer>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    tracing::info!(seed = config.seed, "game loop started");
    let mut engine = SimulationEngine::new(config);
    let started = Instant::now();
    let mut next_tick_time = started;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        engine.observe_frame(started.elapsed().as_secs_f64() * 1000.0);
        let snapshot = engine.tick();

        // 3. Present
        renderer.render(&snapshot);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Options shared by the headless and real-time drivers.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Loop iterations to run. The run also ends on game over or victory.
    pub frames: u64,
    /// Start the next wave whenever the director is idle.
    pub auto_waves: bool,
}

/// Step the engine on this thread as fast as possible.
///
/// Frame timestamps are synthesized at the nominal rate so the FPS estimate
/// reads as if the run were real time.
pub fn run_headless(
    engine: &mut SimulationEngine,
    script: &mut CommandScript,
    options: &RunOptions,
    renderer: &mut dyn Renderer,
) -> GameStateSnapshot {
    let frame_ms = 1000.0 / TICK_RATE as f64;
    let mut last = engine.snapshot();

    for frame in 0..options.frames {
        engine.queue_commands(script.take_due(frame));
        if options.auto_waves && engine.director().phase == WavePhase::Idle {
            engine.queue_command(PlayerCommand::StartWave);
        }

        engine.observe_frame(frame as f64 * frame_ms);
        last = engine.tick();
        renderer.render(&last);

        if engine.phase().is_terminal() {
            break;
        }
    }
    last
}

/// Drive a threaded game loop in wall-clock time, feeding it the script.
pub fn run_realtime(
    config: SimConfig,
    renderer: Box<dyn Renderer>,
    script: &mut CommandScript,
    options: &RunOptions,
) -> Result<Option<GameStateSnapshot>, AppError> {
    let state = crate::state::AppState::new();
    state.start(config, renderer)?;

    let started = Instant::now();
    let mut requested_wave: Option<u32> = None;

    for frame in 0..options.frames {
        for command in script.take_due(frame) {
            state.send_command(command)?;
        }

        if let Some(snapshot) = state.snapshot()? {
            if snapshot.phase.is_terminal() {
                break;
            }
            let wave = snapshot.wave.number;
            if options.auto_waves
                && snapshot.wave.phase == WavePhase::Idle
                && requested_wave != Some(wave)
            {
                state.send_command(PlayerCommand::StartWave)?;
                requested_wave = Some(wave);
            }
        }

        let next = started + TICK_DURATION * (frame as u32 + 1);
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        }
    }

    state.shutdown()?;
    state.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use crate::script::ScheduledCommand;
    use rampart_core::enums::{GamePhase, TowerKind};

    fn script(entries: Vec<(u64, PlayerCommand)>) -> CommandScript {
        entries
            .into_iter()
            .map(|(frame, command)| ScheduledCommand { frame, command })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartWave))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetRunning {
            running: false,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartWave)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::SetRunning { running: false })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_commands([
            PlayerCommand::PlaceTower {
                x: 4,
                y: 5,
                kind: Some(TowerKind::Splash),
            },
            PlayerCommand::StartWave,
            PlayerCommand::SetRunning { running: true },
        ]);

        // Run enough ticks to populate entities
        for _ in 0..400 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_headless_script_unpauses_and_places() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut script = script(vec![
            (0, PlayerCommand::SetRunning { running: true }),
            (
                10,
                PlayerCommand::PlaceTower {
                    x: 4,
                    y: 5,
                    kind: Some(TowerKind::Sniper),
                },
            ),
        ]);
        let options = RunOptions {
            frames: 20,
            auto_waves: false,
        };

        let last = run_headless(&mut engine, &mut script, &options, &mut NullRenderer);
        assert_eq!(last.phase, GamePhase::Running);
        assert_eq!(last.time.tick, 20);
        assert_eq!(last.towers.len(), 1);
        assert_eq!(last.economy.money, 300);
    }

    #[test]
    fn test_headless_auto_waves_runs_to_victory() {
        let mut engine = SimulationEngine::new(SimConfig {
            initial_quota: 1,
            quota_growth: 0,
            max_waves: 2,
            spawn_interval_ticks: 1,
            starting_health: 100,
            ..Default::default()
        });
        engine.set_running(true);
        let options = RunOptions {
            frames: 20_000,
            auto_waves: true,
        };

        let last = run_headless(&mut engine, &mut CommandScript::default(), &options, &mut NullRenderer);
        assert_eq!(last.phase, GamePhase::Victory);
        assert_eq!(last.economy.leaks, 2);
        assert_eq!(last.economy.health, 98);
    }

    #[test]
    fn test_headless_fps_estimate() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let options = RunOptions {
            frames: 120,
            auto_waves: false,
        };
        let last = run_headless(&mut engine, &mut CommandScript::default(), &options, &mut NullRenderer);
        assert_eq!(last.fps, 60);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
