//! `fl-output` — the mission result sink.
//!
//! At stop-timer completion the mission produces two result records; the
//! stock sink appends them to a pair of `.dat` files in the configured
//! output directory:
//!
//! | File                 | Record                  |
//! |----------------------|-------------------------|
//! | `flight-time.dat`    | `0 <elapsed_seconds>`   |
//! | `data_collected.dat` | `0 <bytes_collected>`   |
//!
//! Both files are append-only so repeated runs accumulate one record per
//! mission, ready for plotting.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fl_output::{DatSink, MissionOutputObserver};
//!
//! let sink = DatSink::new(Path::new("./output"))?;
//! let mut obs = MissionOutputObserver::new(sink);
//! mission.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod dat;
pub mod error;
pub mod observer;
pub mod writer;


pub use dat::DatSink;
pub use error::{OutputError, OutputResult};
pub use observer::MissionOutputObserver;
pub use writer::ResultSink;
