//! The `Vehicle` trait — the boundary between the mission core and flight
//! control.

use fl_core::{NodeId, Point2};

// ── Flight state enums ────────────────────────────────────────────────────────

/// The vehicle's current flight mode.
///
/// The mission executor only ever *reads* the mode; switching modes is the
/// flight stack's business.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FlightMode {
    /// Accepting externally commanded targets — the only mode the executor
    /// advances commands in.
    Guided,
    /// Holding position.
    Loiter,
    /// Descending to land.
    Land,
    /// Returning to the launch point autonomously.
    ReturnToLaunch,
}

/// Coarse vehicle health as reported by the flight stack.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VehicleStatus {
    /// Armed and flying normally.
    Active,
    /// On the ground or otherwise not ready for commands.
    Standby,
    /// Failsafe or degraded flight.
    Emergency,
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// Everything the mission core requires of a vehicle.
///
/// `position`/`altitude` are part of the contract because the recovery
/// planner anchors its tour at the current stop and the movement commands
/// decide arrival from the live position.
///
/// Implementations are free to be asynchronous internally; from the mission
/// loop's perspective every call is a cheap, synchronous state read or a
/// fire-and-forget dispatch.
pub trait Vehicle {
    /// Current flight mode.
    fn flight_mode(&self) -> FlightMode;

    /// Current health status.
    fn status(&self) -> VehicleStatus;

    /// Current horizontal position, east/north metres from home.
    fn position(&self) -> Point2;

    /// Current altitude above home, metres.
    fn altitude(&self) -> f64;

    /// Dispatch a movement target.  Non-blocking; progress is observed
    /// through `position`/`altitude`.
    fn move_to(&mut self, east: f64, north: f64, alt: f64);

    /// Attempt to establish a data link with `node` at the given power
    /// budget.  Returns whether the link (and transfer) succeeded; the
    /// success model is the implementation's concern.
    fn attempt_link(&mut self, node: NodeId, power: f64) -> bool;
}
