use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rampart_app::config::{self, AppError};
use rampart_app::game_loop::{self, RunOptions};
use rampart_app::render::TraceRenderer;
use rampart_app::script::CommandScript;
use rampart_core::commands::PlayerCommand;
use rampart_core::enums::GamePhase;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "rampart")]
#[command(about = "Tower-defense simulation runner")]
struct Args {
    /// JSON file with simulation tuning (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to run before stopping
    #[arg(long, default_value = "3600")]
    ticks: u64,

    /// Run on the game loop thread at 60 Hz instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// JSON file of timed player commands. A scripted run starts paused
    /// until the script sends `SetRunning`.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Start each wave as soon as the previous one is cleared
    #[arg(long)]
    auto_waves: bool,

    /// Sim ticks between HUD log lines
    #[arg(long, default_value = "60")]
    hud_interval: u64,
}

/// Printed to stdout when the run ends.
#[derive(Debug, Serialize)]
struct RunSummary {
    ticks: u64,
    phase: GamePhase,
    wave: u32,
    money: u32,
    health: i32,
    kills: u32,
    leaks: u32,
    towers: usize,
    enemies_alive: usize,
}

impl From<&GameStateSnapshot> for RunSummary {
    fn from(snapshot: &GameStateSnapshot) -> Self {
        Self {
            ticks: snapshot.time.tick,
            phase: snapshot.phase,
            wave: snapshot.wave.number,
            money: snapshot.economy.money,
            health: snapshot.economy.health,
            kills: snapshot.economy.kills,
            leaks: snapshot.economy.leaks,
            towers: snapshot.towers.len(),
            enemies_alive: snapshot.enemies.len(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut sim_config = match &args.config {
        Some(path) => config::load_sim_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        sim_config.seed = seed;
    }

    let mut script = match &args.script {
        Some(path) => config::load_script(path)?,
        None => CommandScript::default(),
    };

    let options = RunOptions {
        frames: args.ticks,
        auto_waves: args.auto_waves,
    };
    let renderer = TraceRenderer::new(args.hud_interval);

    tracing::info!(
        seed = sim_config.seed,
        frames = options.frames,
        realtime = args.realtime,
        auto_waves = options.auto_waves,
        "starting run"
    );

    let last = if args.realtime {
        let mut script = with_autostart(script);
        game_loop::run_realtime(sim_config, Box::new(renderer), &mut script, &options)?
    } else {
        let mut engine = SimulationEngine::new(sim_config);
        let mut renderer = renderer;
        if script.is_empty() {
            engine.set_running(true);
        }
        Some(game_loop::run_headless(&mut engine, &mut script, &options, &mut renderer))
    };

    if let Some(snapshot) = last {
        let summary = RunSummary::from(&snapshot);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// An empty script still needs the simulation unpaused.
fn with_autostart(script: CommandScript) -> CommandScript {
    if !script.is_empty() {
        return script;
    }
    vec![rampart_app::script::ScheduledCommand {
        frame: 0,
        command: PlayerCommand::SetRunning { running: true },
    }]
    .into()
}
