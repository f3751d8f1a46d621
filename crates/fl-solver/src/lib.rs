//! `fl-solver` — the open-path (fixed-endpoint Hamiltonian path) solver seam.
//!
//! The recovery planner needs a visiting order over a small point set with a
//! fixed start (the current stop) and a fixed end (the next planned
//! waypoint).  Solving that is delegated to an external binary behind the
//! [`PathSolver`] trait; [`ProcessSolver`] is the stock adapter.
//!
//! General-purpose tour solvers are symmetric: the returned sequence may be
//! rotated and/or reversed relative to the requested anchors.
//! [`correct_open_path`] normalizes the raw response and rejects responses
//! no rotation-plus-single-reversal can fix.
//!
//! # Crate layout
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | [`client`]  | `PathSolver` trait                              |
//! | [`process`] | `ProcessSolver` (external binary, timeout)      |
//! | [`correct`] | `correct_open_path` anchor normalization        |
//! | [`error`]   | `SolverError`, `SolverResult<T>`                |

pub mod client;
pub mod correct;
pub mod error;
pub mod process;


pub use client::PathSolver;
pub use correct::correct_open_path;
pub use error::{SolverError, SolverResult};
pub use process::ProcessSolver;
