//! `fl-command` — the command model of the fieldlink framework.
//!
//! A mission is an ordered queue of [`Command`]s, each driven through the
//! three-phase lifecycle `begin` → `update`* → `is_done` by the executor in
//! `fl-mission`.
//!
//! # Crate layout
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`command`] | `Command` and its variants, lifecycle dispatch       |
//! | [`context`] | `MissionContext` — mission-wide mutable state        |
//! | [`queue`]   | `CommandQueue` (plan order + head insertion)         |
//! | [`tracker`] | `MissedNodeTracker` (LIFO, deduplicated)             |

pub mod command;
pub mod context;
pub mod queue;
pub mod tracker;


pub use command::{
    Collect, Command, CommandKind, LandingBehavior, MoveCollect,
    ACCEPT_RADIUS_M, ALT_BAND_M, LINK_ATTEMPT_BUDGET,
};
pub use context::MissionContext;
pub use queue::CommandQueue;
pub use tracker::MissedNodeTracker;
