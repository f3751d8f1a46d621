//! The `Command` variants and their three-phase lifecycle.
//!
//! # Lifecycle contract
//!
//! | Phase       | Called                                 | Must be            |
//! |-------------|----------------------------------------|--------------------|
//! | `begin`     | once, when the command becomes current | a single trigger   |
//! | `update`    | every executor tick while not done     | cheap, idempotent  |
//! | `is_done`   | every executor tick, before `update`   | a pure predicate   |
//!
//! Dispatch is a `match` over the closed enum; the executor inspects the
//! variant through [`Command::kind`] and the typed accessors, never through
//! downcasting.

use std::time::{Duration, Instant};

use fl_core::{NodeId, Point2};
use fl_vehicle::Vehicle;

use crate::MissionContext;

// ── Tuning constants ──────────────────────────────────────────────────────────

/// Horizontal distance at which a movement target counts as reached, metres.
pub const ACCEPT_RADIUS_M: f64 = 0.5;

/// Vertical band at which an altitude target counts as reached, metres.
pub const ALT_BAND_M: f64 = 0.5;

/// Link attempts a collect command makes on station before completing as
/// failed.
pub const LINK_ATTEMPT_BUDGET: u8 = 3;

// ── Kind and landing tags ─────────────────────────────────────────────────────

/// Discriminant-only view of a [`Command`], for observers and tests.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CommandKind {
    SetAltitude,
    Waypoint,
    Collect,
    MoveCollect,
    StartTimer,
    StopTimer,
    Loiter,
    ReturnHome,
    Land,
}

/// How a move-and-collect approaches its node.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum LandingBehavior {
    /// Stop as soon as the link succeeds (communication range is the radio
    /// model's concern).
    #[default]
    AtRange,
    /// Land exactly on the node's coordinates before attempting the link
    /// (NAIVE algorithm).
    OnNode,
}

// ── Variant states ────────────────────────────────────────────────────────────

/// Change the mission altitude and climb/descend to it in place.
#[derive(Debug)]
pub struct SetAltitude {
    pub alt: f64,
    done:    bool,
}

/// Fly to a waypoint.
#[derive(Debug)]
pub struct Waypoint {
    pub target: Point2,
    pub alt:    f64,
    done:       bool,
}

/// Connect to a node from the current stop and collect its data.
#[derive(Debug)]
pub struct Collect {
    pub node:      NodeId,
    pub power:     f64,
    pub data_size: u64,
    attempts:      u8,
    success:       bool,
    done:          bool,
}

impl Collect {
    /// Whether the collection attempt succeeded.  Meaningful once
    /// `is_done()` is true.
    pub fn collection_success(&self) -> bool {
        self.success
    }
}

/// Composite: fly to a node, then collect from it.
#[derive(Debug)]
pub struct MoveCollect {
    pub node:      NodeId,
    pub target:    Point2,
    pub alt:       f64,
    pub power:     f64,
    pub data_size: u64,
    pub landing:   LandingBehavior,
    leg:           Leg,
    attempts:      u8,
    success:       bool,
    done:          bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Leg {
    Approach,
    Descend,
    Link,
}

impl MoveCollect {
    pub fn collection_success(&self) -> bool {
        self.success
    }

    fn arrived<V: Vehicle>(&self, ctx: &MissionContext<V>) -> bool {
        ctx.vehicle.position().distance(self.target) <= ACCEPT_RADIUS_M
    }
}

/// Mark the mission start time.
#[derive(Debug)]
pub struct StartTimer {
    started: bool,
}

/// Mark the mission stop time.  Completion of this command is the mission's
/// designated termination trigger (the executor emits the result records).
#[derive(Debug)]
pub struct StopTimer {
    stopped: bool,
}

/// Hold position for a fixed duration.
#[derive(Debug)]
pub struct Loiter {
    pub hold: Duration,
    since:    Option<Instant>,
    done:     bool,
}

/// Fly back to the home origin at the current mission altitude.
#[derive(Debug)]
pub struct ReturnHome {
    done: bool,
}

/// Descend to ground at the current position.
#[derive(Debug)]
pub struct Land {
    done: bool,
}

// ── Command ───────────────────────────────────────────────────────────────────

/// A unit of mission work.  Owned by exactly one queue slot, or by the
/// executor's current slot while executing.
#[derive(Debug)]
pub enum Command {
    SetAltitude(SetAltitude),
    Waypoint(Waypoint),
    Collect(Collect),
    MoveCollect(MoveCollect),
    StartTimer(StartTimer),
    StopTimer(StopTimer),
    Loiter(Loiter),
    ReturnHome(ReturnHome),
    Land(Land),
}

impl Command {
    // ── Constructors ──────────────────────────────────────────────────────

    pub fn set_altitude(alt: f64) -> Self {
        Command::SetAltitude(SetAltitude { alt, done: false })
    }

    pub fn waypoint(target: Point2, alt: f64) -> Self {
        Command::Waypoint(Waypoint { target, alt, done: false })
    }

    pub fn collect(node: NodeId, power: f64, data_size: u64) -> Self {
        Command::Collect(Collect {
            node,
            power,
            data_size,
            attempts: 0,
            success:  false,
            done:     false,
        })
    }

    pub fn move_collect(
        node:      NodeId,
        target:    Point2,
        alt:       f64,
        power:     f64,
        data_size: u64,
        landing:   LandingBehavior,
    ) -> Self {
        Command::MoveCollect(MoveCollect {
            node,
            target,
            alt,
            power,
            data_size,
            landing,
            leg:      Leg::Approach,
            attempts: 0,
            success:  false,
            done:     false,
        })
    }

    pub fn start_timer() -> Self {
        Command::StartTimer(StartTimer { started: false })
    }

    pub fn stop_timer() -> Self {
        Command::StopTimer(StopTimer { stopped: false })
    }

    pub fn loiter(hold: Duration) -> Self {
        Command::Loiter(Loiter { hold, since: None, done: false })
    }

    pub fn return_home() -> Self {
        Command::ReturnHome(ReturnHome { done: false })
    }

    pub fn land() -> Self {
        Command::Land(Land { done: false })
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SetAltitude(_) => CommandKind::SetAltitude,
            Command::Waypoint(_)    => CommandKind::Waypoint,
            Command::Collect(_)     => CommandKind::Collect,
            Command::MoveCollect(_) => CommandKind::MoveCollect,
            Command::StartTimer(_)  => CommandKind::StartTimer,
            Command::StopTimer(_)   => CommandKind::StopTimer,
            Command::Loiter(_)      => CommandKind::Loiter,
            Command::ReturnHome(_)  => CommandKind::ReturnHome,
            Command::Land(_)        => CommandKind::Land,
        }
    }

    pub fn is_collect(&self) -> bool {
        matches!(self, Command::Collect(_))
    }

    /// The destination of a waypoint command, used by the recovery planner
    /// as its end anchor.
    pub fn waypoint_target(&self) -> Option<Point2> {
        match self {
            Command::Waypoint(w) => Some(w.target),
            _ => None,
        }
    }

    pub fn as_collect(&self) -> Option<&Collect> {
        match self {
            Command::Collect(c) => Some(c),
            _ => None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Issue the command's side effect.  Called exactly once per instance,
    /// when the executor makes it current.
    pub fn begin<V: Vehicle>(&mut self, ctx: &mut MissionContext<V>) {
        match self {
            Command::SetAltitude(c) => {
                ctx.mission_alt = c.alt;
                let p = ctx.vehicle.position();
                ctx.vehicle.move_to(p.east, p.north, c.alt);
            }
            Command::Waypoint(c) => {
                ctx.vehicle.move_to(c.target.east, c.target.north, c.alt);
            }
            Command::Collect(_) => {
                // Link attempts are made during update polling.
            }
            Command::MoveCollect(c) => {
                ctx.vehicle.move_to(c.target.east, c.target.north, c.alt);
            }
            Command::StartTimer(c) => {
                ctx.timer_start = Some(Instant::now());
                c.started = true;
            }
            Command::StopTimer(c) => {
                ctx.timer_stop = Some(Instant::now());
                c.stopped = true;
            }
            Command::Loiter(c) => {
                c.since = Some(Instant::now());
            }
            Command::ReturnHome(_) => {
                ctx.vehicle.move_to(0.0, 0.0, ctx.mission_alt);
            }
            Command::Land(_) => {
                let p = ctx.vehicle.position();
                ctx.vehicle.move_to(p.east, p.north, 0.0);
            }
        }
    }

    /// Advance internal progress.  Polled by the executor every tick while
    /// `is_done()` is false.
    pub fn update<V: Vehicle>(&mut self, ctx: &mut MissionContext<V>) {
        match self {
            Command::SetAltitude(c) => {
                c.done = (ctx.vehicle.altitude() - c.alt).abs() <= ALT_BAND_M;
            }
            Command::Waypoint(c) => {
                c.done = ctx.vehicle.position().distance(c.target) <= ACCEPT_RADIUS_M;
            }
            Command::Collect(c) => {
                if c.done {
                    return;
                }
                if ctx.vehicle.attempt_link(c.node, c.power) {
                    c.success = true;
                    c.done = true;
                    ctx.bytes_collected += c.data_size;
                } else {
                    c.attempts += 1;
                    if c.attempts >= LINK_ATTEMPT_BUDGET {
                        c.done = true;
                    }
                }
            }
            Command::MoveCollect(c) => {
                if c.done {
                    return;
                }
                match c.landing {
                    LandingBehavior::AtRange => {
                        // Opportunistic: the command completes the moment the
                        // link succeeds, wherever the vehicle is.
                        if ctx.vehicle.attempt_link(c.node, c.power) {
                            c.success = true;
                            c.done = true;
                            ctx.bytes_collected += c.data_size;
                            return;
                        }
                        if c.arrived(ctx) {
                            c.attempts += 1;
                            if c.attempts >= LINK_ATTEMPT_BUDGET {
                                c.done = true;
                            }
                        }
                    }
                    LandingBehavior::OnNode => match c.leg {
                        Leg::Approach => {
                            if c.arrived(ctx) {
                                ctx.vehicle.move_to(c.target.east, c.target.north, 0.0);
                                c.leg = Leg::Descend;
                            }
                        }
                        Leg::Descend => {
                            if ctx.vehicle.altitude() <= ALT_BAND_M {
                                c.leg = Leg::Link;
                            }
                        }
                        Leg::Link => {
                            if ctx.vehicle.attempt_link(c.node, c.power) {
                                c.success = true;
                                c.done = true;
                                ctx.bytes_collected += c.data_size;
                            } else {
                                c.attempts += 1;
                                if c.attempts >= LINK_ATTEMPT_BUDGET {
                                    c.done = true;
                                }
                            }
                        }
                    },
                }
            }
            Command::StartTimer(_) | Command::StopTimer(_) => {}
            Command::Loiter(c) => {
                if let Some(since) = c.since {
                    c.done = since.elapsed() >= c.hold;
                }
            }
            Command::ReturnHome(c) => {
                c.done = ctx.vehicle.position().distance(Point2::ORIGIN) <= ACCEPT_RADIUS_M;
            }
            Command::Land(c) => {
                c.done = ctx.vehicle.altitude() <= ALT_BAND_M;
            }
        }
    }

    /// Pure completion predicate over internal state.
    pub fn is_done(&self) -> bool {
        match self {
            Command::SetAltitude(c) => c.done,
            Command::Waypoint(c)    => c.done,
            Command::Collect(c)     => c.done,
            Command::MoveCollect(c) => c.done,
            Command::StartTimer(c)  => c.started,
            Command::StopTimer(c)   => c.stopped,
            Command::Loiter(c)      => c.done,
            Command::ReturnHome(c)  => c.done,
            Command::Land(c)        => c.done,
        }
    }
}
