//! Runner errors and JSON file loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use rampart_sim::SimConfig;

use crate::script::CommandScript;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(std::io::Error),
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a `SimConfig`. Missing fields keep their defaults.
pub fn load_sim_config(path: &Path) -> Result<SimConfig, AppError> {
    let config: SimConfig = load_json(path)?;
    tracing::debug!(path = %path.display(), seed = config.seed, "loaded config");
    Ok(config)
}

/// Load a list of timed player commands.
pub fn load_script(path: &Path) -> Result<CommandScript, AppError> {
    let script: CommandScript = load_json(path)?;
    tracing::debug!(path = %path.display(), commands = script.len(), "loaded script");
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{ "seed": 9, "max_waves": 3 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_waves, 3);
        assert_eq!(config.starting_money, SimConfig::default().starting_money);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_sim_config(Path::new("/nonexistent/rampart.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/rampart.json"));
    }
}
