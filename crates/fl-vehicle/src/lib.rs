//! `fl-vehicle` — the vehicle seam of the fieldlink framework.
//!
//! The mission core never talks to flight hardware directly; everything goes
//! through the [`Vehicle`] trait.  A mission binary plugs in a MAVLink- or
//! DroneKit-backed implementation; tests and demos use [`SimVehicle`].
//!
//! # Crate layout
//!
//! | Module        | Contents                                     |
//! |---------------|----------------------------------------------|
//! | [`interface`] | `Vehicle`, `FlightMode`, `VehicleStatus`     |
//! | [`sim`]       | `SimVehicle` (teleporting, disc radio model) |

pub mod interface;
pub mod sim;


pub use interface::{FlightMode, Vehicle, VehicleStatus};
pub use sim::SimVehicle;
