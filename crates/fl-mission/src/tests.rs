//! Integration tests for the mission executor and recovery planner.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fl_command::{Command, CommandKind};
use fl_core::{AlgorithmMode, MissionConfig, NodeId, Point2};
use fl_plan::{load_nodes_reader, load_plan_reader};
use fl_solver::{PathSolver, SolverError, SolverResult};
use fl_vehicle::SimVehicle;

use crate::{MissionBuilder, MissionExecutor, MissionObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Node 5 ~2.83 m from the (10, 0) stop; node 9 far out.
const NODES: &str = "\
5 10.0.0.5 340 12.0 2.0
9 10.0.0.9 2048 -30.0 40.0
";

/// Scripted solver: counts invocations and plays back a fixed response.
#[derive(Clone)]
enum StubResponse {
    Identity,
    Fixed(Vec<usize>),
    Fail,
}

struct StubSolver {
    calls:    Arc<AtomicUsize>,
    response: StubResponse,
}

impl PathSolver for StubSolver {
    fn solve(&mut self, points: &[Point2], _start: usize, _end: usize) -> SolverResult<Vec<usize>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Identity     => Ok((0..points.len()).collect()),
            StubResponse::Fixed(order) => Ok(order.clone()),
            StubResponse::Fail         => Err(SolverError::MalformedOutput("stub".into())),
        }
    }
}

/// Observer that records everything the executor reports.
#[derive(Default)]
struct Recorder {
    begun:          Vec<CommandKind>,
    collections:    Vec<(NodeId, bool)>,
    recoveries:     Vec<usize>,
    liveness_waits: usize,
    ended:          Option<(f64, u64)>,
}

impl MissionObserver for Recorder {
    fn on_command_begin(&mut self, kind: CommandKind) {
        self.begun.push(kind);
    }
    fn on_collection(&mut self, node: NodeId, success: bool) {
        self.collections.push((node, success));
    }
    fn on_recovery_inserted(&mut self, count: usize) {
        self.recoveries.push(count);
    }
    fn on_liveness_wait(&mut self) {
        self.liveness_waits += 1;
    }
    fn on_mission_end(&mut self, elapsed_secs: f64, bytes_collected: u64) {
        self.ended = Some((elapsed_secs, bytes_collected));
    }
}

/// Build a mission over the standard two-node field.
///
/// The vehicle's range scale is shrunk so collects fail at planned stops but
/// succeed once a move-collect is on (or over) the node.
fn build_mission(
    plan_text: &str,
    algorithm: AlgorithmMode,
    response:  StubResponse,
) -> (MissionExecutor<SimVehicle, StubSolver>, Arc<AtomicUsize>) {
    let plan = load_plan_reader(Cursor::new(plan_text)).unwrap();
    let nodes = load_nodes_reader(Cursor::new(NODES)).unwrap();
    let positions: Vec<_> = nodes.positions().collect();
    let vehicle = SimVehicle::new()
        .with_nodes(positions)
        .with_range_scale(0.01);

    let calls = Arc::new(AtomicUsize::new(0));
    let solver = StubSolver { calls: Arc::clone(&calls), response };

    let config = MissionConfig { algorithm, ..MissionConfig::default() };
    let mission = MissionBuilder::new(config, vehicle, solver)
        .plan(plan)
        .nodes(nodes)
        .build()
        .unwrap();
    (mission, calls)
}

fn move_collect_node(cmd: &Command) -> Option<NodeId> {
    match cmd {
        Command::MoveCollect(mc) => Some(mc.node),
        _ => None,
    }
}

/// Step the mission until the first recovery batch is inserted.
fn step_until_recovery(mission: &mut MissionExecutor<SimVehicle, StubSolver>, rec: &mut Recorder) {
    for _ in 0..200 {
        if !rec.recoveries.is_empty() {
            return;
        }
        mission.run_steps(1, rec);
    }
    panic!("recovery batch was never inserted");
}

// ── Plan-order execution ──────────────────────────────────────────────────────

#[cfg(test)]
mod plan_order {
    use super::*;
    use crate::ExecState;

    #[test]
    fn zero_collect_plan_executes_in_file_order() {
        let (mut mission, calls) = build_mission(
            "0 10 0 20\n0 -5 5 20\n2 30\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        let mut rec = Recorder::default();
        mission.run(&mut rec);

        assert_eq!(mission.state(), ExecState::Terminated);
        assert_eq!(
            rec.begun,
            vec![
                CommandKind::SetAltitude, // climb to mission altitude
                CommandKind::StartTimer,
                CommandKind::Waypoint,
                CommandKind::Waypoint,
                CommandKind::SetAltitude,
                CommandKind::ReturnHome,
                CommandKind::StopTimer,
            ]
        );
        assert!(rec.recoveries.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn mission_end_reports_elapsed_and_bytes() {
        let (mut mission, _) = build_mission(
            "0 10 0 20\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        let mut rec = Recorder::default();
        mission.run(&mut rec);

        let (elapsed, bytes) = rec.ended.expect("mission end reported");
        assert!(elapsed >= 0.0);
        assert_eq!(bytes, 0);
    }

    #[test]
    fn append_land_descends_after_stop_timer() {
        let plan = load_plan_reader(Cursor::new("0 10 0 20\n")).unwrap();
        let config = MissionConfig { append_land: true, ..MissionConfig::default() };
        let solver = StubSolver {
            calls:    Arc::new(AtomicUsize::new(0)),
            response: StubResponse::Identity,
        };
        let mut mission = MissionBuilder::new(config, SimVehicle::new(), solver)
            .plan(plan)
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        mission.run(&mut rec);

        // The land command is begun as the loop winds down: the vehicle is
        // told to descend even though no further updates are polled.
        assert_eq!(rec.begun.last(), Some(&CommandKind::Land));
        assert!(rec.ended.is_some());
    }
}

// ── DEFAULT / NAIVE recovery ──────────────────────────────────────────────────

#[cfg(test)]
mod default_recovery {
    use super::*;

    #[test]
    fn missed_node_recovered_before_next_plan_command() {
        // Waypoint stop, failing collect, then a planned set-altitude.
        let (mut mission, calls) = build_mission(
            "0 10 0 20\n1 5 40\n2 30\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        let mut rec = Recorder::default();
        mission.run(&mut rec);

        assert_eq!(rec.collections, vec![(NodeId(5), false)]);
        assert_eq!(rec.recoveries, vec![1]);
        assert_eq!(
            rec.begun,
            vec![
                CommandKind::SetAltitude,
                CommandKind::StartTimer,
                CommandKind::Waypoint,
                CommandKind::Collect,
                CommandKind::MoveCollect, // recovery, before the planned SetAltitude
                CommandKind::SetAltitude,
                CommandKind::ReturnHome,
                CommandKind::StopTimer,
            ]
        );
        // The move-collect reached the node and collected its 340 bytes.
        assert_eq!(rec.ended.unwrap().1, 340);
        assert_eq!(calls.load(Ordering::SeqCst), 0, "DEFAULT never consults the solver");
    }

    #[test]
    fn two_missed_nodes_recovered_in_recorded_order() {
        let (mut mission, calls) = build_mission(
            "0 10 0 20\n1 5 40\n1 9 40\n2 30\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        let mut rec = Recorder::default();
        step_until_recovery(&mut mission, &mut rec);

        assert_eq!(rec.collections, vec![(NodeId(5), false), (NodeId(9), false)]);
        assert_eq!(rec.recoveries, vec![2]);

        // The batch head was popped as the new current command; node 5 (first
        // recorded miss) runs first, node 9 is next in the queue.
        assert_eq!(move_collect_node(&mission.current), Some(NodeId(5)));
        assert_eq!(
            mission.queue.iter().filter_map(move_collect_node).collect::<Vec<_>>(),
            vec![NodeId(9)]
        );

        mission.run(&mut rec);
        assert_eq!(rec.ended.unwrap().1, 340 + 2048);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn collect_success_inserts_no_recovery() {
        let plan = load_plan_reader(Cursor::new("0 10 0 20\n1 5 40\n2 30\n")).unwrap();
        let nodes = load_nodes_reader(Cursor::new(NODES)).unwrap();
        let positions: Vec<_> = nodes.positions().collect();
        // Full range scale: effective power ≥ 35 m reaches node 5 from the stop.
        let vehicle = SimVehicle::new().with_nodes(positions);
        let solver = StubSolver {
            calls:    Arc::new(AtomicUsize::new(0)),
            response: StubResponse::Identity,
        };
        let mut mission = MissionBuilder::new(MissionConfig::default(), vehicle, solver)
            .plan(plan)
            .nodes(nodes)
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        mission.run(&mut rec);

        assert_eq!(rec.collections, vec![(NodeId(5), true)]);
        assert!(rec.recoveries.is_empty());
        assert_eq!(rec.ended.unwrap().1, 340);
    }
}

// ── NO_SUB ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod no_sub {
    use super::*;

    #[test]
    fn misses_are_forfeited() {
        let (mut mission, calls) = build_mission(
            "0 10 0 20\n1 5 40\n1 9 40\n2 30\n",
            AlgorithmMode::NoSub,
            StubResponse::Identity,
        );
        let mut rec = Recorder::default();
        mission.run(&mut rec);

        assert_eq!(rec.collections, vec![(NodeId(5), false), (NodeId(9), false)]);
        assert!(rec.recoveries.is_empty(), "NO_SUB inserts no recovery commands");
        assert!(!rec.begun.contains(&CommandKind::MoveCollect));
        assert_eq!(rec.ended.unwrap().1, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(mission.tracker.is_empty(), "tracker drained at the boundary");
    }
}

// ── ONLINE recovery ───────────────────────────────────────────────────────────

#[cfg(test)]
mod online_recovery {
    use super::*;

    /// Two misses + current stop + upcoming waypoint → 4 candidate points.
    const TWO_MISS_PLAN: &str = "0 10 0 20\n1 5 40\n1 9 40\n0 25 0 20\n2 30\n";

    #[test]
    fn small_candidate_set_skips_the_solver() {
        // One miss and no upcoming waypoint → 2 candidates, below the
        // routing threshold.
        let (mut mission, calls) = build_mission(
            "0 10 0 20\n1 5 40\n2 30\n",
            AlgorithmMode::Online,
            StubResponse::Identity,
        );
        let mut rec = Recorder::default();
        mission.run(&mut rec);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(rec.recoveries, vec![1]);
        assert_eq!(rec.ended.unwrap().1, 340);
    }

    #[test]
    fn solver_called_once_and_route_followed() {
        // Candidates: [stop, node 9, node 5, waypoint] (misses drain LIFO).
        // Solver answer 0→2→1→3 visits node 5 first.
        let (mut mission, calls) = build_mission(
            TWO_MISS_PLAN,
            AlgorithmMode::Online,
            StubResponse::Fixed(vec![0, 2, 1, 3]),
        );
        let mut rec = Recorder::default();
        step_until_recovery(&mut mission, &mut rec);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(rec.recoveries, vec![3]);

        // Recovery begins adjacent to the current stop (node 5), visits
        // node 9, and ends at the waypoint anchor just before the planned
        // waypoint command.
        assert_eq!(move_collect_node(&mission.current), Some(NodeId(5)));
        let kinds: Vec<_> = mission.queue.iter().map(Command::kind).collect();
        assert_eq!(
            kinds,
            vec![
                CommandKind::MoveCollect, // node 9
                CommandKind::Waypoint,    // end anchor
                CommandKind::Waypoint,    // planned waypoint
                CommandKind::SetAltitude,
                CommandKind::ReturnHome,
                CommandKind::StopTimer,
            ]
        );
        assert_eq!(
            mission.queue.iter().filter_map(move_collect_node).collect::<Vec<_>>(),
            vec![NodeId(9)]
        );

        mission.run(&mut rec);
        assert_eq!(calls.load(Ordering::SeqCst), 1, "exactly one solve per boundary");
        assert_eq!(rec.ended.unwrap().1, 340 + 2048);
    }

    #[test]
    fn rotated_solver_response_is_corrected() {
        // A symmetric solver cut the cycle elsewhere: rotation recovers
        // 0 → 1 → 2 → 3.
        let (mut mission, calls) = build_mission(
            TWO_MISS_PLAN,
            AlgorithmMode::Online,
            StubResponse::Fixed(vec![1, 2, 3, 0]),
        );
        let mut rec = Recorder::default();
        step_until_recovery(&mut mission, &mut rec);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Corrected order visits node 9 (tour index 1) first.
        assert_eq!(move_collect_node(&mission.current), Some(NodeId(9)));

        mission.run(&mut rec);
        assert_eq!(rec.ended.unwrap().1, 340 + 2048);
    }

    #[test]
    fn solver_failure_falls_back_to_direct_insertion() {
        let (mut mission, calls) = build_mission(
            TWO_MISS_PLAN,
            AlgorithmMode::Online,
            StubResponse::Fail,
        );
        let mut rec = Recorder::default();
        step_until_recovery(&mut mission, &mut rec);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(rec.recoveries, vec![3], "both nodes plus the end anchor");
        // Candidate-list order: LIFO drain puts node 9 first.
        assert_eq!(move_collect_node(&mission.current), Some(NodeId(9)));

        mission.run(&mut rec);
        assert_eq!(rec.ended.unwrap().1, 340 + 2048);
    }

    #[test]
    fn anchor_inconsistent_route_skips_recovery() {
        // 0 → 1 → 3 → 2 cannot be fixed by rotation + one reversal.
        let (mut mission, calls) = build_mission(
            TWO_MISS_PLAN,
            AlgorithmMode::Online,
            StubResponse::Fixed(vec![0, 1, 3, 2]),
        );
        let mut rec = Recorder::default();
        mission.run(&mut rec);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(rec.recoveries.is_empty(), "pass skipped, nodes lost");
        assert!(!rec.begun.contains(&CommandKind::MoveCollect));
        assert_eq!(rec.ended.unwrap().1, 0);
    }
}

// ── Liveness gate and lifecycle ───────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::ExecState;
    use fl_vehicle::VehicleStatus;

    #[test]
    fn unmet_precondition_waits_without_advancing() {
        let (mut mission, _) = build_mission(
            "0 10 0 20\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        mission.ctx.vehicle.set_status(VehicleStatus::Standby);

        let mut rec = Recorder::default();
        mission.run_steps(5, &mut rec);

        // The first command was begun when the mission started, but no
        // command state advanced while the gate was closed.
        assert_eq!(rec.begun, vec![CommandKind::SetAltitude]);
        assert_eq!(rec.liveness_waits, 1);
        assert_eq!(mission.state(), ExecState::Running);

        mission.ctx.vehicle.set_status(VehicleStatus::Active);
        mission.run(&mut rec);
        assert_eq!(mission.state(), ExecState::Terminated);
        assert!(rec.ended.is_some());
    }

    #[test]
    fn dispose_is_idempotent_and_final() {
        let (mut mission, _) = build_mission(
            "0 10 0 20\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        mission.dispose();
        mission.dispose();
        assert_eq!(mission.state(), ExecState::Terminated);

        let mut rec = Recorder::default();
        mission.run(&mut rec);
        assert!(rec.begun.is_empty(), "terminated missions do not restart");
    }

    #[test]
    fn detached_start_joins_with_results() {
        let (mission, _) = build_mission(
            "0 10 0 20\n1 5 40\n2 30\n",
            AlgorithmMode::Default,
            StubResponse::Identity,
        );
        let handle = mission.start_detached(Recorder::default());
        let (mission, rec) = handle.join().unwrap();

        assert_eq!(mission.state(), ExecState::Terminated);
        assert_eq!(rec.ended.unwrap().1, 340);
    }

    #[test]
    fn unknown_collect_target_fails_at_build() {
        let plan = load_plan_reader(Cursor::new("1 77 40\n")).unwrap();
        let nodes = load_nodes_reader(Cursor::new(NODES)).unwrap();
        let solver = StubSolver {
            calls:    Arc::new(AtomicUsize::new(0)),
            response: StubResponse::Identity,
        };
        let result = MissionBuilder::new(MissionConfig::default(), SimVehicle::new(), solver)
            .plan(plan)
            .nodes(nodes)
            .build();
        assert!(matches!(result, Err(crate::MissionError::NodeNotFound(NodeId(77)))));
    }
}
