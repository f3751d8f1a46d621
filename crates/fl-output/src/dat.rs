//! `.dat` result backend.
//!
//! Appends to two files in the configured output directory:
//! - `flight-time.dat`
//! - `data_collected.dat`
//!
//! Records are space-separated with a constant `0` index column, one line
//! per mission, matching the plotting format of the original field tooling.

use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::ResultSink;
use crate::OutputResult;

/// Appends mission results to the two `.dat` files.
pub struct DatSink {
    flight_time:    Writer<File>,
    data_collected: Writer<File>,
    finished:       bool,
}

impl DatSink {
    /// Open (or create) the two `.dat` files in `dir` for appending.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            flight_time:    open_append(&dir.join("flight-time.dat"))?,
            data_collected: open_append(&dir.join("data_collected.dat"))?,
            finished:       false,
        })
    }
}

fn open_append(path: &Path) -> OutputResult<Writer<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(WriterBuilder::new().delimiter(b' ').from_writer(file))
}

impl ResultSink for DatSink {
    fn record_flight_time(&mut self, elapsed_secs: f64) -> OutputResult<()> {
        let value = elapsed_secs.to_string();
        self.flight_time.write_record(["0", value.as_str()])?;
        Ok(())
    }

    fn record_data_collected(&mut self, bytes: u64) -> OutputResult<()> {
        let value = bytes.to_string();
        self.data_collected.write_record(["0", value.as_str()])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flight_time.flush()?;
        self.data_collected.flush()?;
        Ok(())
    }
}
