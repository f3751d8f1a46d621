//! smallfield — smallest end-to-end fieldlink mission.
//!
//! Flies a simulated vehicle over a four-node sensor field.  Two of the
//! planned stops are deliberately out of link range, so each data-collection
//! phase ends with a recovery subtour that revisits the missed node before
//! the mission continues.
//!
//! Usage: `smallfield [DEFAULT|NAIVE|ONLINE|NO_SUB]`
//!
//! `ONLINE` routes recovery through the external solver named by the
//! `SMALLFIELD_SOLVER` environment variable; without one the planner logs
//! the failure and falls back to direct insertion.

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;

use fl_core::{AlgorithmMode, MissionConfig, NodeId};
use fl_mission::{MissionBuilder, MissionObserver};
use fl_output::{DatSink, MissionOutputObserver, ResultSink};
use fl_plan::{load_nodes_reader, load_plan_reader};
use fl_solver::ProcessSolver;
use fl_vehicle::SimVehicle;

// ── Field definition ──────────────────────────────────────────────────────────

// Nominal link power 25 gives an effective range of roughly 20–28 m: the
// stops sit ~10 m from nodes 1 and 3 (collected in place) and ~45 m from
// nodes 2 and 4 (missed, then recovered).
const PLAN: &str = "\
0 40 0 30
1 1 25
1 2 25
0 120 20 30
1 3 25
1 4 25
2 40
";

const NODES: &str = "\
1 10.0.0.1 512 40.0 10.0
2 10.0.0.2 1024 80.0 -20.0
3 10.0.0.3 340 120.0 30.0
4 10.0.0.4 2048 160.0 0.0
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints mission progress and forwards the result records to the sink.
struct ConsoleObserver<S: ResultSink> {
    inner:      MissionOutputObserver<S>,
    collected:  usize,
    missed:     usize,
    recoveries: usize,
}

impl<S: ResultSink> ConsoleObserver<S> {
    fn new(inner: MissionOutputObserver<S>) -> Self {
        Self { inner, collected: 0, missed: 0, recoveries: 0 }
    }
}

impl<S: ResultSink> MissionObserver for ConsoleObserver<S> {
    fn on_collection(&mut self, node: NodeId, success: bool) {
        if success {
            self.collected += 1;
            println!("  collected from node {}", node.0);
        } else {
            self.missed += 1;
            println!("  MISSED node {} — queued for recovery", node.0);
        }
    }

    fn on_recovery_inserted(&mut self, count: usize) {
        self.recoveries += 1;
        println!("  recovery subtour inserted: {count} command(s)");
    }

    fn on_mission_end(&mut self, elapsed_secs: f64, bytes_collected: u64) {
        println!("mission complete: {elapsed_secs:.3} s, {bytes_collected} bytes");
        self.inner.on_mission_end(elapsed_secs, bytes_collected);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let algorithm: AlgorithmMode = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None      => AlgorithmMode::Default,
    };

    println!("=== smallfield — fieldlink mission ===");
    println!("Algorithm: {algorithm}");
    println!();

    // 1. Load the embedded plan and node table.
    let plan = load_plan_reader(Cursor::new(PLAN))?;
    let nodes = load_nodes_reader(Cursor::new(NODES))?;
    println!("Plan: {} entries  |  Field: {} nodes", plan.len(), nodes.len());

    // 2. Simulated vehicle with the field registered in its radio model.
    let positions: Vec<_> = nodes.positions().collect();
    let vehicle = SimVehicle::new().with_nodes(positions);

    // 3. External open-path solver (only consulted in ONLINE mode).
    let config = MissionConfig {
        algorithm,
        mission_alt: 30.0,
        append_land: true,
        ..MissionConfig::default()
    };
    let solver_bin =
        std::env::var("SMALLFIELD_SOLVER").unwrap_or_else(|_| "open-path-solver".into());
    let solver = ProcessSolver::new(solver_bin, config.solver_timeout);

    // 4. Build the mission.
    let detached = config.detached;
    let mission = MissionBuilder::new(config, vehicle, solver)
        .plan(plan)
        .nodes(nodes)
        .build()?;
    println!("Queue seeded: {} pending commands", mission.queue.len() + 1);
    println!();

    // 5. Result sink.
    std::fs::create_dir_all("output/smallfield")?;
    let sink = DatSink::new(Path::new("output/smallfield"))?;
    let mut obs = ConsoleObserver::new(MissionOutputObserver::new(sink));

    // 6. Fly.
    let (mission, mut obs) = if detached {
        let handle = mission.start_detached(obs);
        handle.join().expect("mission thread panicked")
    } else {
        let mut mission = mission;
        mission.run(&mut obs);
        (mission, obs)
    };

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    println!();
    println!("{:<24} {}", "Collected stops:", obs.collected);
    println!("{:<24} {}", "Missed stops:", obs.missed);
    println!("{:<24} {}", "Recovery subtours:", obs.recoveries);
    println!("{:<24} {}", "Bytes collected:", mission.ctx.bytes_collected);
    println!();
    println!("Results appended to output/smallfield/flight-time.dat and data_collected.dat");

    Ok(())
}
