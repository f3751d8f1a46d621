use fl_core::NodeId;
use fl_plan::PlanError;
use fl_solver::SolverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("plan load error: {0}")]
    Plan(#[from] PlanError),

    #[error("node {0} referenced by the mission is not in the node table")]
    NodeNotFound(NodeId),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type MissionResult<T> = Result<T, MissionError>;
