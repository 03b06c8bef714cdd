//! `cq-routing` — how a released driver picks its next intersection.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`context`] | `RouteContext<'a>` — read-only per-run routing inputs          |
//! | [`cache`]   | `SinkPathCache` — lazily filled node → next-hop-to-sink table  |
//! | [`policy`]  | `RoutingPolicy` trait, `ClassRouting` default implementation   |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                             |
//!
//! # Policy summary
//!
//! | Class         | Next hop                                                    |
//! |---------------|-------------------------------------------------------------|
//! | `Disciplined` | successor of the current node on the fixed origin→sink path |
//! | `Erratic`     | with prob. `p`: uniform random neighbour; otherwise the 2nd |
//! |               | node of the shortest path from the current node to the sink |

pub mod cache;
pub mod context;
pub mod error;
pub mod policy;

#[cfg(test)]
mod tests;

pub use cache::SinkPathCache;
pub use context::RouteContext;
pub use error::{RoutingError, RoutingResult};
pub use policy::{ClassRouting, RoutingPolicy};
