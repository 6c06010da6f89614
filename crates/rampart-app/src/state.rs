//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use rampart_core::commands::PlayerCommand;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::SimConfig;

use crate::config::AppError;
use crate::game_loop;
use crate::render::Renderer;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a game loop running on its own thread.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state can be shared (`Sync`)
/// - `Mutex<Option<...>>` covers the time before `start` is called
/// - the latest snapshot is shared with the loop thread through `Arc<Mutex<...>>`
pub struct AppState {
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread. Fails if one is already running.
    pub fn start(&self, config: SimConfig, renderer: Box<dyn Renderer>) -> Result<(), AppError> {
        let mut running = self.running.lock().map_err(|_| AppError::Poisoned)?;
        if *running {
            return Err(AppError::AlreadyRunning);
        }

        let cmd_tx = game_loop::spawn_game_loop(config, renderer, self.latest_snapshot.clone())?;
        *self.command_tx.lock().map_err(|_| AppError::Poisoned)? = Some(cmd_tx);
        *running = true;
        Ok(())
    }

    /// Forward a player command to the loop; it applies at the next tick.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Stop the loop thread. The last snapshot stays available.
    pub fn shutdown(&self) -> Result<(), AppError> {
        self.send(GameLoopCommand::Shutdown)?;
        *self.running.lock().map_err(|_| AppError::Poisoned)? = false;
        *self.command_tx.lock().map_err(|_| AppError::Poisoned)? = None;
        Ok(())
    }

    /// Latest snapshot published by the loop, if any.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::Disconnected),
            None => Err(AppError::NotStarted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use std::time::{Duration, Instant};

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send_command(PlayerCommand::StartWave).unwrap_err();
        assert!(matches!(err, AppError::NotStarted));
    }

    #[test]
    fn test_start_publish_and_shutdown() {
        let state = AppState::new();
        state
            .start(SimConfig::default(), Box::new(NullRenderer))
            .unwrap();
        assert!(matches!(
            state.start(SimConfig::default(), Box::new(NullRenderer)),
            Err(AppError::AlreadyRunning)
        ));

        state
            .send_command(PlayerCommand::PlaceTower {
                x: 4,
                y: 5,
                kind: None,
            })
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut towers = 0;
        while Instant::now() < deadline {
            if let Some(snapshot) = state.snapshot().unwrap() {
                towers = snapshot.towers.len();
                if towers == 1 {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(towers, 1);

        state.shutdown().unwrap();
        assert!(!*state.running.lock().unwrap());
        assert!(state.snapshot().unwrap().is_some());
    }
}
