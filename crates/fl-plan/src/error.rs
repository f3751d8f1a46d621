use fl_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("line {line}: unexpected command token {token:?} (expected 0, 1, or 2)")]
    MalformedLine { line: usize, token: String },

    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("duplicate node id {0} in node-info file")]
    DuplicateNode(NodeId),

    #[error("node-info read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
