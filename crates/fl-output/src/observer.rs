//! `MissionOutputObserver<S>` — bridges `MissionObserver` to a `ResultSink`.

use fl_mission::MissionObserver;

use crate::writer::ResultSink;
use crate::{OutputError, OutputResult};

/// A [`MissionObserver`] that writes the stop-timer result records to any
/// [`ResultSink`] backend.
///
/// Errors from the sink are stored internally because `MissionObserver`
/// methods have no return value.  After the mission terminates, check for
/// errors with [`take_error`][Self::take_error].
pub struct MissionOutputObserver<S: ResultSink> {
    sink:       S,
    last_error: Option<OutputError>,
}

impl<S: ResultSink> MissionOutputObserver<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, last_error: None }
    }

    /// Take the stored write error (if any) after the mission terminates.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner sink (e.g. to inspect files after the mission).
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn write_results(&mut self, elapsed_secs: f64, bytes_collected: u64) -> OutputResult<()> {
        self.sink.record_flight_time(elapsed_secs)?;
        self.sink.record_data_collected(bytes_collected)?;
        self.sink.finish()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<S: ResultSink> MissionObserver for MissionOutputObserver<S> {
    fn on_mission_end(&mut self, elapsed_secs: f64, bytes_collected: u64) {
        let result = self.write_results(elapsed_secs, bytes_collected);
        self.store_err(result);
    }
}
