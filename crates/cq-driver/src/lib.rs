//! `cq-driver` — the drivers being simulated.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`driver`] | `Driver` (identity, class, iteration count, path history) |
//! | [`pool`]   | `DriverPool` (seeded population generation)               |
//!
//! Drivers are created once, before the first tick, and are never destroyed
//! mid-run: they travel between node queues and come to rest at the sink.

pub mod driver;
pub mod pool;


pub use driver::Driver;
pub use pool::DriverPool;
