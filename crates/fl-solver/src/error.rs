use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to launch solver: {0}")]
    Io(#[from] std::io::Error),

    #[error("solver exited with status {0:?}")]
    NonZeroExit(Option<i32>),

    #[error("solver produced no result within {0:?}")]
    Timeout(Duration),

    #[error("malformed solver output: {0}")]
    MalformedOutput(String),

    #[error("solver path cannot be anchored at start {start} and end {end}")]
    AnchorInconsistent { start: usize, end: usize },
}

pub type SolverResult<T> = Result<T, SolverError>;
