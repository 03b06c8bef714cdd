//! `cq-sim` — tick loop orchestrator for the commute-queue simulator.
//!
//! # Two-phase tick loop
//!
//! ```text
//! seed: every driver queued at the origin, path nodes marked active
//! loop until every driver sits in the sink queue:
//!   ① Release — for each active node (snapshot order, sink skipped):
//!                 pop the head driver, or drop the node if its queue is empty;
//!                 count the hop and ask the RoutingPolicy for the next node.
//!   ② Apply   — in release order: enqueue each driver at its next node
//!                 and mark that node active.
//!   ③ Observe — ArrivalRecorder counts the sink queue per class.
//!   ④ Check   — terminate when the sink's id set equals the population.
//! ```
//!
//! Staging the moves in ① and applying them in ② keeps every driver to at
//! most one hop per tick and every node to at most one release per tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`queues`]   | `NodeQueues` (per-node FIFO), `QueueEmpty`           |
//! | [`active`]   | `ActiveNodes` (insertion-ordered active set)         |
//! | [`recorder`] | `ArrivalRecorder`, `ArrivalCurve`                    |
//! | [`config`]   | `SimConfig`                                          |
//! | [`report`]   | `RunReport`, `RunOutcome`, `SimState`                |
//! | [`sim`]      | `Sim` and its tick loop                              |
//! | [`builder`]  | `SimBuilder`                                         |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `TickStats`           |
//! | [`sweep`]    | parameter-grid runner                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs sweep points on Rayon's thread pool.              |
//! | `serde`    | `Serialize`/`Deserialize` for `SimConfig`, `RunReport`.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cq_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let config = SimConfig {
//!     driver_count:           50,
//!     erratic_fraction:       0.2,
//!     wrong_turn_probability: 0.1,
//!     ..SimConfig::new(origin, sink)
//! };
//! let mut sim = SimBuilder::new(config, &network).build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! println!("finished after {}", outcome.report().ticks);
//! ```

pub mod active;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod queues;
pub mod recorder;
pub mod report;
pub mod sim;
pub mod sweep;


pub use active::ActiveNodes;
pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use queues::{NodeQueues, QueueEmpty};
pub use recorder::{ArrivalCurve, ArrivalRecorder};
pub use report::{RunOutcome, RunReport, SimState};
pub use sim::Sim;
pub use sweep::{PointSummary, SweepPlan, SweepPoint, SweepRun, grid, run_sweep, summarize};
