//! Rejections returned to callers of player commands.
//!
//! None of these are fatal: the simulation keeps running and no state is
//! changed when a command is rejected.

use thiserror::Error;

use crate::components::TowerId;
use crate::enums::PlacementIssue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("insufficient funds: need {cost}, have {available}")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("cannot place tower at ({x}, {y}): {reason}")]
    InvalidPlacement {
        x: i32,
        y: i32,
        reason: PlacementIssue,
    },
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("no tower with id {0}")]
    UnknownTower(TowerId),
    #[error("the game has ended")]
    SimulationEnded,
}
