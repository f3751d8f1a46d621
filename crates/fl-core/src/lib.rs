//! `fl-core` — foundational types for the `fieldlink` mission framework.
//!
//! This crate is a dependency of every other `fl-*` crate.  It intentionally
//! has no `fl-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`ids`]      | `NodeId`                                            |
//! | [`geo`]      | `Point2`, planar Euclidean distance                 |
//! | [`config`]   | `AlgorithmMode`, `MissionConfig`                    |
//! | [`rng`]      | `MissionRng` (seeded, deterministic)                |
//! | [`error`]    | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.      |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AlgorithmMode, MissionConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Point2;
pub use ids::NodeId;
pub use rng::MissionRng;
