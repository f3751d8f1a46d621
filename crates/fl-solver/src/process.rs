//! `ProcessSolver` — drives an external solver binary over stdio.
//!
//! # Wire protocol
//!
//! Request (stdin): the point count, one `east north` line per point, then
//! the two anchor indices:
//!
//! ```text
//! 4
//! 0 0
//! 12 2
//! -30 40
//! 25 0
//! 0 3
//! ```
//!
//! Response (stdout): one point index per line — a permutation of
//! `0..count`.  Blank lines are ignored.
//!
//! The call blocks the mission loop, so it is bounded by the configured
//! timeout; on expiry the child is killed and the planner falls back to
//! direct insertion.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use fl_core::Point2;
use tracing::debug;

use crate::{PathSolver, SolverError, SolverResult};

/// Adapter around an external open-path solver binary.
pub struct ProcessSolver {
    program: PathBuf,
    timeout: Duration,
}

impl ProcessSolver {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { program: program.into(), timeout }
    }

    fn run(&self, request: String, count: usize) -> SolverResult<Vec<usize>> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // Write the request and close stdin so the solver sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(request.as_bytes())?;
        }

        // Read stdout on a helper thread so the wait can be bounded.
        let Some(mut stdout) = child.stdout.take() else {
            return Err(SolverError::MalformedOutput("solver stdout unavailable".into()));
        };
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut out = String::new();
            let _ = stdout.read_to_string(&mut out);
            let _ = tx.send(out);
        });

        let out = match rx.recv_timeout(self.timeout) {
            Ok(out) => out,
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SolverError::Timeout(self.timeout));
            }
        };

        let status = child.wait()?;
        if !status.success() {
            return Err(SolverError::NonZeroExit(status.code()));
        }

        parse_output(&out, count)
    }
}

impl PathSolver for ProcessSolver {
    fn solve(&mut self, points: &[Point2], start: usize, end: usize) -> SolverResult<Vec<usize>> {
        let mut request = String::new();
        request.push_str(&format!("{}\n", points.len()));
        for p in points {
            request.push_str(&format!("{} {}\n", p.east, p.north));
        }
        request.push_str(&format!("{start} {end}\n"));

        debug!(points = points.len(), start, end, "invoking external path solver");
        self.run(request, points.len())
    }
}

/// Parse solver stdout into a visiting order and validate it is a
/// permutation of `0..count`.
pub fn parse_output(out: &str, count: usize) -> SolverResult<Vec<usize>> {
    let mut order = Vec::with_capacity(count);
    for line in out.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let idx: usize = line.parse().map_err(|_| {
            SolverError::MalformedOutput(format!("expected point index, got {line:?}"))
        })?;
        order.push(idx);
    }

    if order.len() != count {
        return Err(SolverError::MalformedOutput(format!(
            "expected {count} indices, got {}",
            order.len()
        )));
    }
    let mut seen = vec![false; count];
    for &idx in &order {
        if idx >= count {
            return Err(SolverError::MalformedOutput(format!("index {idx} out of range")));
        }
        if seen[idx] {
            return Err(SolverError::MalformedOutput(format!("index {idx} repeated")));
        }
        seen[idx] = true;
    }
    Ok(order)
}
