//! A simulated vehicle for tests and demo runs.

use fl_core::{NodeId, Point2};
use rustc_hash::FxHashMap;

use crate::{FlightMode, Vehicle, VehicleStatus};

/// Simulated vehicle with teleport kinematics and a disc radio model.
///
/// # Kinematics
///
/// `move_to` places the vehicle on the target immediately.  Flight dynamics
/// are out of scope; the mission loop only needs arrival to be observable
/// through `position`/`altitude`, and a teleport makes every simulated run
/// deterministic.
///
/// # Radio model
///
/// `attempt_link(node, power)` succeeds iff the node is registered and the
/// horizontal distance to it is at most `power * range_scale` metres.  This
/// stands in for the real communication model (NS-3 in the original
/// deployment); `range_scale` exists so tests can force out-of-range
/// failures at planned stops.
#[derive(Debug, Clone)]
pub struct SimVehicle {
    mode:        FlightMode,
    status:      VehicleStatus,
    position:    Point2,
    altitude:    f64,
    range_scale: f64,
    nodes:       FxHashMap<NodeId, Point2>,
    link_calls:  usize,
}

impl SimVehicle {
    /// A vehicle at home, on the ground, Guided/Active, unit range scale.
    pub fn new() -> Self {
        Self {
            mode:        FlightMode::Guided,
            status:      VehicleStatus::Active,
            position:    Point2::ORIGIN,
            altitude:    0.0,
            range_scale: 1.0,
            nodes:       FxHashMap::default(),
            link_calls:  0,
        }
    }

    /// Register the sensor nodes the radio model can reach.
    pub fn with_nodes<I: IntoIterator<Item = (NodeId, Point2)>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Scale factor applied to the power-derived link range.
    pub fn with_range_scale(mut self, scale: f64) -> Self {
        self.range_scale = scale;
        self
    }

    /// Force a flight mode (e.g. to exercise the liveness gate).
    pub fn set_mode(&mut self, mode: FlightMode) {
        self.mode = mode;
    }

    /// Force a health status.
    pub fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }

    /// Total `attempt_link` calls made against this vehicle.
    pub fn link_calls(&self) -> usize {
        self.link_calls
    }
}

impl Default for SimVehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl Vehicle for SimVehicle {
    fn flight_mode(&self) -> FlightMode {
        self.mode
    }

    fn status(&self) -> VehicleStatus {
        self.status
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn altitude(&self) -> f64 {
        self.altitude
    }

    fn move_to(&mut self, east: f64, north: f64, alt: f64) {
        self.position = Point2::new(east, north);
        self.altitude = alt;
    }

    fn attempt_link(&mut self, node: NodeId, power: f64) -> bool {
        self.link_calls += 1;
        match self.nodes.get(&node) {
            None      => false,
            Some(pos) => self.position.distance(*pos) <= power * self.range_scale,
        }
    }
}
