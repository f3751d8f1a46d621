//! The `MissionExecutor` state machine.

use std::thread;

use tracing::{debug, warn};

use fl_command::{Command, CommandQueue, MissedNodeTracker, MissionContext};
use fl_core::MissionConfig;
use fl_plan::NodeTable;
use fl_solver::PathSolver;
use fl_vehicle::{FlightMode, Vehicle, VehicleStatus};

use crate::observer::MissionObserver;
use crate::planner::SubtourPlanner;

// ── ExecState ─────────────────────────────────────────────────────────────────

/// Executor lifecycle state.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExecState {
    /// Built, not yet run.
    Idle,
    /// Driving commands.
    Running,
    /// Mission over; `run` returns immediately.
    Terminated,
}

// ── MissionExecutor ───────────────────────────────────────────────────────────

/// Drives one [`Command`] at a time to completion, polling the vehicle
/// liveness precondition and advancing the queue.
///
/// Exactly one command is current at any instant.  The executor holds no
/// domain data of its own beyond the current command and the queue; all
/// mission state lives in the [`MissionContext`].
///
/// Create via [`MissionBuilder`][crate::MissionBuilder].
pub struct MissionExecutor<V: Vehicle, S: PathSolver> {
    /// Mission configuration (algorithm mode, backoff, …).
    pub config: MissionConfig,

    /// Mission-wide mutable state, including the vehicle.
    pub ctx: MissionContext<V>,

    /// Pending commands.  Mutated only by head pops here and head
    /// insertions from the recovery planner.
    pub queue: CommandQueue,

    /// The single currently executing command.
    pub current: Command,

    /// Nodes whose collection failed during the current phase.
    pub tracker: MissedNodeTracker,

    /// Static node lookup table.
    pub nodes: NodeTable,

    pub(crate) planner: SubtourPlanner<S>,
    state: ExecState,
}

impl<V: Vehicle, S: PathSolver> MissionExecutor<V, S> {
    pub(crate) fn new(
        config:  MissionConfig,
        ctx:     MissionContext<V>,
        queue:   CommandQueue,
        current: Command,
        nodes:   NodeTable,
        planner: SubtourPlanner<S>,
    ) -> Self {
        Self {
            config,
            ctx,
            queue,
            current,
            tracker: MissedNodeTracker::new(),
            nodes,
            planner,
            state: ExecState::Idle,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn state(&self) -> ExecState {
        self.state
    }

    /// Run the mission to termination, blocking the caller.
    ///
    /// Safe to call again after termination (returns immediately).
    pub fn run<O: MissionObserver>(&mut self, observer: &mut O) {
        self.ensure_started(observer);
        while self.state == ExecState::Running {
            if !self.vehicle_live() {
                observer.on_liveness_wait();
                thread::sleep(self.config.backoff);
                continue;
            }
            self.step(observer);
        }
    }

    /// Run the mission on a dedicated thread; the caller continues.
    ///
    /// Join the handle to get the executor (and observer) back once the
    /// mission terminates.
    pub fn start_detached<O>(mut self, mut observer: O) -> thread::JoinHandle<(Self, O)>
    where
        V: Send + 'static,
        S: Send + 'static,
        O: MissionObserver + Send + 'static,
    {
        thread::spawn(move || {
            self.run(&mut observer);
            (self, observer)
        })
    }

    /// Advance by at most `n` loop iterations (no backoff sleeping).
    ///
    /// Useful for tests and incremental stepping.  Returns early if the
    /// mission terminates or the liveness precondition is unmet.
    pub fn run_steps<O: MissionObserver>(&mut self, n: usize, observer: &mut O) {
        self.ensure_started(observer);
        for _ in 0..n {
            if self.state != ExecState::Running {
                break;
            }
            if !self.vehicle_live() {
                observer.on_liveness_wait();
                return;
            }
            self.step(observer);
        }
    }

    /// Terminate the mission.  Idempotent; observed at the next loop
    /// iteration — the current command is never preempted mid-update.
    pub fn dispose(&mut self) {
        self.state = ExecState::Terminated;
    }

    // ── Loop internals ────────────────────────────────────────────────────

    fn ensure_started<O: MissionObserver>(&mut self, observer: &mut O) {
        if self.state != ExecState::Idle {
            return;
        }
        self.state = ExecState::Running;
        observer.on_mission_start();
        debug!(queued = self.queue.len(), "mission started");
        self.current.begin(&mut self.ctx);
        observer.on_command_begin(self.current.kind());
    }

    /// "Guided and active" — the precondition for advancing command state.
    fn vehicle_live(&self) -> bool {
        self.ctx.vehicle.flight_mode() == FlightMode::Guided
            && self.ctx.vehicle.status() == VehicleStatus::Active
    }

    /// One tick: complete-and-advance, or poll the current command.
    fn step<O: MissionObserver>(&mut self, observer: &mut O) {
        if self.current.is_done() {
            self.on_command_complete(observer);
            match self.queue.pop_front() {
                Some(next) => {
                    self.current = next;
                    self.current.begin(&mut self.ctx);
                    observer.on_command_begin(self.current.kind());
                }
                None => self.dispose(),
            }
        } else {
            self.current.update(&mut self.ctx);
        }
    }

    /// Variant-specific completion hook, run before the queue advances.
    fn on_command_complete<O: MissionObserver>(&mut self, observer: &mut O) {
        match &self.current {
            Command::Collect(c) => {
                let node = c.node;
                let success = c.collection_success();
                observer.on_collection(node, success);
                if !success {
                    self.tracker.record(node);
                }

                // Phase boundary: the stop's collects are exhausted when the
                // next queued command is not itself a collect.
                let boundary = !self.queue.front().is_some_and(Command::is_collect);
                if boundary && !self.tracker.is_empty() {
                    match self.planner.plan_recovery(
                        self.config.algorithm,
                        &mut self.tracker,
                        self.queue.front(),
                        &self.ctx,
                        &self.nodes,
                    ) {
                        Ok(batch) if !batch.is_empty() => {
                            let inserted = batch.len();
                            self.queue.extend_front(batch);
                            observer.on_recovery_inserted(inserted);
                        }
                        Ok(_) => {}
                        Err(err) => {
                            warn!(error = %err, "recovery planning failed; continuing without a recovery route");
                        }
                    }
                }
            }

            Command::StopTimer(_) => {
                // Designated completion trigger: emit result records via the
                // observer and raise the termination flag.  A trailing land
                // command (if queued) is still begun below so the vehicle
                // descends while the loop winds down.
                let elapsed = self.ctx.elapsed_secs().unwrap_or(0.0);
                observer.on_mission_end(elapsed, self.ctx.bytes_collected);
                self.dispose();
            }

            _ => {}
        }
    }
}
