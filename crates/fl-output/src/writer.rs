//! The `ResultSink` trait implemented by all result backends.

use crate::OutputResult;

/// Destination for the two mission result records.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`MissionOutputObserver::take_error`][crate::MissionOutputObserver::take_error].
pub trait ResultSink {
    /// Record the mission's elapsed flight time in seconds.
    fn record_flight_time(&mut self, elapsed_secs: f64) -> OutputResult<()>;

    /// Record the mission's total collected sensor bytes.
    fn record_data_collected(&mut self, bytes: u64) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
