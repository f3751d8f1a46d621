//! `fl-mission` — the mission state machine of the fieldlink framework.
//!
//! # Execution model
//!
//! ```text
//! loop while Running:
//!   ① Liveness — vehicle must be Guided + Active; otherwise back off
//!               and retry (a wait, never an error).
//!   ② Advance  — current command done?
//!                 yes → on-complete hook (miss tracking, phase-boundary
//!                       recovery planning, stop-timer termination), then
//!                       pop the next command and begin it, or dispose
//!                 no  → poll the current command's update()
//! ```
//!
//! The recovery planner runs inside the on-complete hook: when a collect
//! command finishes and the next queued command is not a collect, the
//! contiguous data-collection stop is over and any missed nodes are turned
//! into a recovery batch inserted at the queue head.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fl_mission::{MissionBuilder, NoopObserver};
//!
//! let mut mission = MissionBuilder::new(config, vehicle, solver)
//!     .plan(plan)
//!     .nodes(nodes)
//!     .build()?;
//! mission.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod observer;
pub mod planner;

#[cfg(test)]
mod tests;

pub use builder::MissionBuilder;
pub use error::{MissionError, MissionResult};
pub use executor::{ExecState, MissionExecutor};
pub use observer::{MissionObserver, NoopObserver};
pub use planner::{SubtourPlanner, TourPoint};
