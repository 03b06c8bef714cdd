//! `cq-core` — foundational types for the commute-queue simulator.
//!
//! This crate is a dependency of every other `cq-*` crate.  It has no `cq-*`
//! dependencies and only two external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`ids`]     | `DriverId`, `NodeId`, `EdgeId`                       |
//! | [`class`]   | `DriverClass` (disciplined / erratic)                |
//! | [`time`]    | `Tick`                                               |
//! | [`rng`]     | `SimRng` (per-run, injectable)                       |
//! | [`error`]   | `CoreError`, `CoreResult`, probability validation    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod class;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::DriverClass;
pub use error::{CoreError, CoreResult, check_probability};
pub use ids::{DriverId, EdgeId, NodeId};
pub use rng::SimRng;
pub use time::Tick;
