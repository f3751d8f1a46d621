//! Mission observer trait for progress reporting and result collection.

use fl_command::CommandKind;
use fl_core::NodeId;

/// Callbacks invoked by [`MissionExecutor::run`][crate::MissionExecutor::run]
/// at key points in the mission loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — collection logger
///
/// ```rust,ignore
/// struct CollectionLog;
///
/// impl MissionObserver for CollectionLog {
///     fn on_collection(&mut self, node: NodeId, success: bool) {
///         println!("{node}: {}", if success { "collected" } else { "missed" });
///     }
/// }
/// ```
pub trait MissionObserver {
    /// Called once, when the executor leaves Idle.
    fn on_mission_start(&mut self) {}

    /// Called every time a command becomes current and has been begun.
    fn on_command_begin(&mut self, _kind: CommandKind) {}

    /// Called when a collect command completes, successfully or not.
    fn on_collection(&mut self, _node: NodeId, _success: bool) {}

    /// Called after a recovery batch of `count` commands was inserted at the
    /// queue head.
    fn on_recovery_inserted(&mut self, _count: usize) {}

    /// Called each loop iteration the vehicle liveness precondition is
    /// unmet, before the backoff sleep.
    fn on_liveness_wait(&mut self) {}

    /// Called once at stop-timer completion with the mission elapsed time
    /// and total collected bytes — the values the result sink records.
    fn on_mission_end(&mut self, _elapsed_secs: f64, _bytes_collected: u64) {}
}

/// A [`MissionObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl MissionObserver for NoopObserver {}
