//! Fluent builder for constructing a [`MissionExecutor`].

use fl_command::{Command, CommandQueue, MissionContext};
use fl_core::{MissionConfig, MissionRng, Point2};
use fl_plan::{MissionPlan, NodeTable, PlanEntry};
use fl_solver::PathSolver;
use fl_vehicle::Vehicle;

use crate::planner::SubtourPlanner;
use crate::{MissionError, MissionExecutor, MissionResult};

/// Spread of the uniform perturbation applied to each node's nominal link
/// power when sampling its effective power.
const POWER_JITTER_SPREAD: f64 = 4.0;

/// Fluent builder for [`MissionExecutor<V, S>`].
///
/// # Required inputs
///
/// - [`MissionConfig`] — algorithm mode, mission altitude, backoff, seed, …
/// - `V: Vehicle` — the flight interface
/// - `S: PathSolver` — the recovery route solver (only invoked in `Online`
///   mode; pass any implementation otherwise)
///
/// # Optional inputs (have defaults)
///
/// | Method      | Default                  |
/// |-------------|--------------------------|
/// | `.plan(p)`  | `MissionPlan::empty()`   |
/// | `.nodes(t)` | Empty `NodeTable`        |
///
/// # Queue construction
///
/// The initial queue is the plan bracketed by the mission frame:
///
/// ```text
/// climb to mission altitude → start timer → [plan entries] →
/// return home → stop timer → [land, simulation runs only]
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let mut mission = MissionBuilder::new(config, vehicle, solver)
///     .plan(load_plan(Path::new("drone_plan.pln"))?)
///     .nodes(load_nodes(Path::new("node_info.txt"))?)
///     .build()?;
/// mission.run(&mut NoopObserver);
/// ```
pub struct MissionBuilder<V: Vehicle, S: PathSolver> {
    config:  MissionConfig,
    vehicle: V,
    solver:  S,
    plan:    Option<MissionPlan>,
    nodes:   Option<NodeTable>,
}

impl<V: Vehicle, S: PathSolver> MissionBuilder<V, S> {
    /// Create a builder with all required inputs.
    pub fn new(config: MissionConfig, vehicle: V, solver: S) -> Self {
        Self {
            config,
            vehicle,
            solver,
            plan:  None,
            nodes: None,
        }
    }

    /// Supply the parsed mission plan.
    pub fn plan(mut self, plan: MissionPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Supply the node lookup table.
    ///
    /// Required whenever the plan contains collect-data entries: each target
    /// node's data size comes from here, and recovery planning fails for
    /// unknown ids.
    pub fn nodes(mut self, nodes: NodeTable) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Validate the plan against the node table, sample effective link
    /// powers, assemble the initial queue, and return a ready-to-run
    /// [`MissionExecutor`].
    pub fn build(self) -> MissionResult<MissionExecutor<V, S>> {
        let plan = self.plan.unwrap_or_default();
        let nodes = self.nodes.unwrap_or_default();
        let mut rng = MissionRng::new(self.config.seed);
        let mut ctx = MissionContext::new(self.vehicle, self.config.mission_alt);

        // The initial climb is the first current command; everything else
        // queues behind it.
        let current = Command::set_altitude(self.config.mission_alt);

        let mut queue = CommandQueue::new();
        queue.push_back(Command::start_timer());

        for entry in plan.entries() {
            match *entry {
                PlanEntry::Waypoint { east, north, alt } => {
                    queue.push_back(Command::waypoint(Point2::new(east, north), alt));
                }
                PlanEntry::CollectData { node, power } => {
                    let info = nodes.get(node).ok_or(MissionError::NodeNotFound(node))?;
                    let effective = rng.jitter(power - 1.0, POWER_JITTER_SPREAD);
                    ctx.node_powers.insert(node, effective);
                    queue.push_back(Command::collect(node, effective, info.data_size));
                }
                PlanEntry::SetAltitude { alt } => {
                    queue.push_back(Command::set_altitude(alt));
                }
            }
        }

        queue.push_back(Command::return_home());
        queue.push_back(Command::stop_timer());
        if self.config.append_land {
            queue.push_back(Command::land());
        }

        Ok(MissionExecutor::new(
            self.config,
            ctx,
            queue,
            current,
            nodes,
            SubtourPlanner::new(self.solver),
        ))
    }
}
