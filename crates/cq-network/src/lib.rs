//! `cq-network` — the road network the commute simulation runs on.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (undirected CSR), `RoadNetworkBuilder`        |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`loader`]  | `load_network_csv`, `load_network_reader` (`u,v,length`)    |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! The network is immutable once built.  Nothing in this crate holds per-run
//! state, so one `RoadNetwork` can be shared by many concurrent simulations.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use router::{DijkstraRouter, Route, Router};
