//! Framework error type.
//!
//! Sub-crates define their own error enums (`PlanError`, `SolverError`,
//! `MissionError`, `OutputError`); `CoreError` covers only what this crate
//! itself can reject.

use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("unknown algorithm {0:?}: expected DEFAULT, NAIVE, ONLINE, or NO_SUB")]
    UnknownAlgorithm(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
