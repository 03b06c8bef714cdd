//! Simulation observer trait for progress reporting and data collection.

use cq_core::Tick;
use cq_driver::Driver;

use crate::{NodeQueues, SimState};

/// Per-tick counters passed to [`SimObserver::on_tick_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    pub tick: Tick,

    /// Size of the active set after the tick.
    pub active_nodes: usize,

    /// Drivers released and moved this tick.
    pub moved: usize,

    /// New sink arrivals this tick, `[disciplined, erratic]`.
    pub arrived: [u32; 2],
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats, _queues: &NodeQueues) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: moved {}", stats.tick, stats.moved);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any release.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once for every driver that steps onto the sink, just before
    /// it joins the sink queue.
    fn on_arrival(&mut self, _tick: Tick, _driver: &Driver) {}

    /// Called at the end of each completed tick with read-only access to all
    /// queues, so callers can audit state without the sim knowing why.
    fn on_tick_end(&mut self, _stats: &TickStats, _queues: &NodeQueues) {}

    /// Called once when the run stops, whether it converged or not.
    fn on_sim_end(&mut self, _final_tick: Tick, _state: SimState) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
