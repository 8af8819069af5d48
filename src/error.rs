//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::game::RunState;

/// Failure to load or validate a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to read or write the persisted best score.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine a data directory for the best score file")]
    NoDataDir,
    #[error("best score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("best score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// A state machine edge that is not allowed from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a run is already in progress")]
    AlreadyRunning,
    #[error("no run is in progress (state: {0:?})")]
    NotRunning(RunState),
    #[error("only a finished run can be reset (state: {0:?})")]
    NotEnded(RunState),
}
