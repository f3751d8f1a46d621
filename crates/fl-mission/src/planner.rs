//! `SubtourPlanner` — turns missed nodes into a recovery command batch.
//!
//! Invoked at a phase boundary: a collect command has just completed and the
//! next queued command is not a collect, so the contiguous data-collection
//! stop is over.  The planner drains the missed-node tracker and produces
//! recovery commands in execution order; the executor inserts them
//! contiguously at the queue head.
//!
//! # Strategy per algorithm mode
//!
//! | Mode      | Behavior                                                    |
//! |-----------|-------------------------------------------------------------|
//! | `NoSub`   | Drain and forfeit — no recovery commands.                   |
//! | `Default` | One move-collect per node, stop at communication range.     |
//! | `Naive`   | One move-collect per node, land on the node.                |
//! | `Online`  | Route the revisit with the open-path solver, anchored at    |
//! |           | the current stop and the next planned waypoint.             |
//!
//! The `Online` branch degrades gracefully: solver launch failures,
//! timeouts, and malformed output fall back to direct insertion in candidate
//! order; an anchor-inconsistent route is rejected outright (the nodes are
//! lost for this pass and the mission continues).

use std::collections::VecDeque;

use tracing::{debug, warn};

use fl_command::{Command, LandingBehavior, MissedNodeTracker, MissionContext};
use fl_core::{AlgorithmMode, NodeId, Point2};
use fl_plan::NodeTable;
use fl_solver::{correct_open_path, PathSolver, SolverError};
use fl_vehicle::Vehicle;

use crate::{MissionError, MissionResult};

// ── TourPoint ─────────────────────────────────────────────────────────────────

/// A candidate point in the recovery routing problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TourPoint {
    pub position: Point2,
    /// `None` marks an anchor — the current stop or the next planned
    /// waypoint — whose place in the solved path is fixed and which is not
    /// itself a sensor node.
    pub node: Option<NodeId>,
}

// ── SubtourPlanner ────────────────────────────────────────────────────────────

/// Phase-boundary recovery planner.
pub struct SubtourPlanner<S: PathSolver> {
    solver: S,
}

impl<S: PathSolver> SubtourPlanner<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Build the recovery batch for one phase boundary.
    ///
    /// Drains `tracker` in all modes.  The returned commands are in
    /// execution order, ready for [`CommandQueue::extend_front`]
    /// [fl_command::CommandQueue::extend_front].  Errors abort the pass (the
    /// drained nodes are lost); the caller reports and continues.
    pub fn plan_recovery<V: Vehicle>(
        &mut self,
        algorithm: AlgorithmMode,
        tracker:   &mut MissedNodeTracker,
        next:      Option<&Command>,
        ctx:       &MissionContext<V>,
        nodes:     &NodeTable,
    ) -> MissionResult<Vec<Command>> {
        match algorithm {
            AlgorithmMode::NoSub => {
                debug!(forfeited = tracker.len(), "subtours disabled; dropping missed nodes");
                tracker.clear();
                Ok(Vec::new())
            }
            AlgorithmMode::Default => {
                Self::plan_direct(tracker, ctx, nodes, LandingBehavior::AtRange)
            }
            AlgorithmMode::Naive => {
                Self::plan_direct(tracker, ctx, nodes, LandingBehavior::OnNode)
            }
            AlgorithmMode::Online => self.plan_online(tracker, next, ctx, nodes),
        }
    }

    // ── Direct insertion (DEFAULT / NAIVE) ────────────────────────────────

    /// One move-collect per missed node.  Draining is LIFO and each command
    /// is pushed to the batch front, so execution follows the order the
    /// misses were recorded.
    fn plan_direct<V: Vehicle>(
        tracker: &mut MissedNodeTracker,
        ctx:     &MissionContext<V>,
        nodes:   &NodeTable,
        landing: LandingBehavior,
    ) -> MissionResult<Vec<Command>> {
        let mut batch = VecDeque::new();
        for node in tracker.drain_lifo() {
            batch.push_front(move_collect_for(node, ctx, nodes, landing)?);
        }
        Ok(batch.into())
    }

    // ── Solver-assisted routing (ONLINE) ──────────────────────────────────

    fn plan_online<V: Vehicle>(
        &mut self,
        tracker: &mut MissedNodeTracker,
        next:    Option<&Command>,
        ctx:     &MissionContext<V>,
        nodes:   &NodeTable,
    ) -> MissionResult<Vec<Command>> {
        let missed = tracker.drain_lifo();
        if missed.is_empty() {
            return Ok(Vec::new());
        }

        // Candidate tour: current stop first, then the missed nodes, then —
        // if the next queued command is a waypoint move — its destination as
        // the end anchor.
        let mut tour = vec![TourPoint { position: ctx.vehicle.position(), node: None }];
        for node in missed {
            let info = nodes.get(node).ok_or(MissionError::NodeNotFound(node))?;
            tour.push(TourPoint { position: info.position, node: Some(node) });
        }
        let end_anchor = next.and_then(Command::waypoint_target);
        if let Some(position) = end_anchor {
            tour.push(TourPoint { position, node: None });
        }

        // An open path needs two distinct fixed endpoints; with fewer than 3
        // points the route is forced anyway.
        if tour.len() >= 3 && end_anchor.is_some() {
            let points: Vec<Point2> = tour.iter().map(|t| t.position).collect();
            let (start, end) = (0, points.len() - 1);

            let routed = self
                .solver
                .solve(&points, start, end)
                .and_then(|raw| correct_open_path(raw, start, end));

            match routed {
                Ok(order) => {
                    debug!(points = points.len(), "solver routed recovery subtour");
                    // Skip the leading current-stop anchor: the vehicle is
                    // already there.
                    return order
                        .into_iter()
                        .skip(1)
                        .map(|idx| emit(&tour[idx], ctx, nodes))
                        .collect();
                }
                Err(err @ SolverError::AnchorInconsistent { .. }) => {
                    warn!(error = %err, "solver route cannot be anchored; skipping recovery pass");
                    return Err(MissionError::Solver(err));
                }
                Err(err) => {
                    warn!(error = %err, "solver unavailable; falling back to direct insertion");
                }
            }
        }

        // Small case, missing end anchor, or solver fallback: candidate
        // order, still skipping the current-stop anchor.
        tour[1..].iter().map(|t| emit(t, ctx, nodes)).collect()
    }
}

// ── Command emission ──────────────────────────────────────────────────────────

/// Translate one tour point into its recovery command.
fn emit<V: Vehicle>(
    point: &TourPoint,
    ctx:   &MissionContext<V>,
    nodes: &NodeTable,
) -> MissionResult<Command> {
    match point.node {
        None => Ok(Command::waypoint(point.position, ctx.mission_alt)),
        Some(node) => move_collect_for(node, ctx, nodes, LandingBehavior::AtRange),
    }
}

fn move_collect_for<V: Vehicle>(
    node:    NodeId,
    ctx:     &MissionContext<V>,
    nodes:   &NodeTable,
    landing: LandingBehavior,
) -> MissionResult<Command> {
    let info = nodes.get(node).ok_or(MissionError::NodeNotFound(node))?;
    Ok(Command::move_collect(
        node,
        info.position,
        ctx.mission_alt,
        ctx.power_for(node),
        info.data_size,
        landing,
    ))
}
