//! Mission configuration and the recovery-algorithm selector.

use std::str::FromStr;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── AlgorithmMode ─────────────────────────────────────────────────────────────

/// Which missed-node recovery strategy the mission uses.
///
/// Fixed for the mission's lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmMode {
    /// Revisit missed nodes in plan order, stopping at communication range.
    #[default]
    Default,
    /// Like `Default`, but the vehicle lands directly on each node.
    Naive,
    /// Order the revisit with the external open-path solver.
    Online,
    /// Never revisit — data from missed nodes is forfeited.
    NoSub,
}

impl AlgorithmMode {
    /// Human-readable label, matching the plan-tool spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmMode::Default => "DEFAULT",
            AlgorithmMode::Naive   => "NAIVE",
            AlgorithmMode::Online  => "ONLINE",
            AlgorithmMode::NoSub   => "NO_SUB",
        }
    }
}

impl FromStr for AlgorithmMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "DEFAULT" => Ok(AlgorithmMode::Default),
            "NAIVE"   => Ok(AlgorithmMode::Naive),
            "ONLINE"  => Ok(AlgorithmMode::Online),
            "NO_SUB"  => Ok(AlgorithmMode::NoSub),
            other     => Err(CoreError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl std::fmt::Display for AlgorithmMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MissionConfig ─────────────────────────────────────────────────────────────

/// Top-level mission configuration.
///
/// Typically assembled by the application crate and passed to the mission
/// builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionConfig {
    /// Missed-node recovery strategy.
    pub algorithm: AlgorithmMode,

    /// Mission altitude in metres until a set-altitude command changes it.
    pub mission_alt: f64,

    /// How long to sleep when the vehicle liveness precondition is unmet.
    pub backoff: Duration,

    /// Upper bound on one external solver invocation.  On expiry the planner
    /// falls back to direct recovery insertion.
    pub solver_timeout: Duration,

    /// Master RNG seed.  The same seed always produces identical effective
    /// link powers.
    pub seed: u64,

    /// Append a final land command after the stop-timer (simulation runs).
    pub append_land: bool,

    /// Run the mission on a dedicated thread instead of blocking the caller.
    pub detached: bool,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            algorithm:      AlgorithmMode::Default,
            mission_alt:    50.0,
            backoff:        Duration::from_millis(100),
            solver_timeout: Duration::from_secs(10),
            seed:           42,
            append_land:    false,
            detached:       false,
        }
    }
}
