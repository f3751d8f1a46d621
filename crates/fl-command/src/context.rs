//! Mission-wide mutable state, threaded through every command.
//!
//! One `MissionContext` exists per mission, owned by the executor.  It is
//! the replacement for process-wide globals: the vehicle handle, the current
//! mission altitude, per-node effective link powers, the collected-bytes
//! counter, and the mission timer all live here.

use std::time::Instant;

use fl_core::NodeId;
use fl_vehicle::Vehicle;
use rustc_hash::FxHashMap;

/// Mutable mission state shared by the executor, the commands, and the
/// recovery planner.
pub struct MissionContext<V: Vehicle> {
    /// The vehicle.  Exclusively owned; commands reach it through `&mut`.
    pub vehicle: V,

    /// Altitude for all subsequent movement, metres.  Mutated by
    /// set-altitude commands.
    pub mission_alt: f64,

    /// Effective link power per node, sampled once at mission build.
    pub node_powers: FxHashMap<NodeId, f64>,

    /// Total sensor bytes collected so far.
    pub bytes_collected: u64,

    /// Set by the start-timer command.
    pub timer_start: Option<Instant>,

    /// Set by the stop-timer command.
    pub timer_stop: Option<Instant>,
}

impl<V: Vehicle> MissionContext<V> {
    pub fn new(vehicle: V, mission_alt: f64) -> Self {
        Self {
            vehicle,
            mission_alt,
            node_powers:     FxHashMap::default(),
            bytes_collected: 0,
            timer_start:     None,
            timer_stop:      None,
        }
    }

    /// Effective link power for `node`; zero for nodes with no sampled
    /// power (mirrors the original's default power entry).
    pub fn power_for(&self, node: NodeId) -> f64 {
        self.node_powers.get(&node).copied().unwrap_or(0.0)
    }

    /// Seconds between the start- and stop-timer marks, if both fired.
    pub fn elapsed_secs(&self) -> Option<f64> {
        let (start, stop) = (self.timer_start?, self.timer_stop?);
        stop.checked_duration_since(start).map(|d| d.as_secs_f64())
    }
}
