//! The `RoutingPolicy` trait and the two-class default.

use tracing::trace;

use cq_core::{DriverClass, NodeId, SimRng};
use cq_driver::Driver;
use cq_network::{DijkstraRouter, RoadNetwork, Route, Router};

use crate::{RouteContext, RoutingError, RoutingResult, SinkPathCache};

/// Pluggable next-hop decision.
///
/// The simulation loop calls [`next_hop`][Self::next_hop] once for every
/// driver released from a queue.  All randomness comes from the run's
/// `SimRng`, so a policy must not keep hidden random state of its own.
///
/// # Thread safety
///
/// A sweep may share one policy across parallel runs, so implementations
/// must be `Send + Sync`.  Per-run mutable state belongs in
/// [`SinkPathCache`], which every run owns separately.
pub trait RoutingPolicy: Send + Sync {
    /// Plan the fixed origin→sink path followed by disciplined drivers.
    fn origin_path(
        &self,
        network: &RoadNetwork,
        origin:  NodeId,
        sink:    NodeId,
    ) -> RoutingResult<Route>;

    /// Choose where `driver`, just released at `at`, goes next.
    ///
    /// May update the driver's `path_history`; must not touch its
    /// iteration count.
    fn next_hop(
        &self,
        driver: &mut Driver,
        at:     NodeId,
        ctx:    &RouteContext<'_>,
        cache:  &mut SinkPathCache,
        rng:    &mut SimRng,
    ) -> RoutingResult<NodeId>;
}

// ── ClassRouting ──────────────────────────────────────────────────────────────

/// Disciplined drivers follow the origin path; erratic drivers flip a coin
/// each hop between a random turn and their own shortest path to the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassRouting<R: Router = DijkstraRouter> {
    pub router: R,
}

impl<R: Router> ClassRouting<R> {
    pub fn new(router: R) -> Self {
        Self { router }
    }

    fn erratic_hop(
        &self,
        driver: &mut Driver,
        at:     NodeId,
        ctx:    &RouteContext<'_>,
        cache:  &mut SinkPathCache,
        rng:    &mut SimRng,
    ) -> RoutingResult<NodeId> {
        if rng.gen_bool(ctx.wrong_turn_probability) {
            // No cycle prevention: the random neighbour may lead backwards.
            let hop = rng
                .choose(ctx.network.neighbors(at))
                .copied()
                .ok_or(RoutingError::UnreachableSink { from: at, sink: ctx.sink })?;
            trace!(driver = %driver.id, from = %at, to = %hop, "wrong turn");
            return Ok(hop);
        }

        let hop = cache.next_hop(&self.router, ctx.network, at)?;
        driver.record_on_path(at);
        Ok(hop)
    }
}

impl<R: Router> RoutingPolicy for ClassRouting<R> {
    fn origin_path(
        &self,
        network: &RoadNetwork,
        origin:  NodeId,
        sink:    NodeId,
    ) -> RoutingResult<Route> {
        self.router
            .route(network, origin, sink)
            .map_err(|e| RoutingError::from_network(e, sink))
    }

    fn next_hop(
        &self,
        driver: &mut Driver,
        at:     NodeId,
        ctx:    &RouteContext<'_>,
        cache:  &mut SinkPathCache,
        rng:    &mut SimRng,
    ) -> RoutingResult<NodeId> {
        match driver.class {
            DriverClass::Disciplined => ctx
                .origin_path
                .next_after(at)
                .ok_or(RoutingError::OffPath { driver: driver.id, node: at }),
            DriverClass::Erratic => self.erratic_hop(driver, at, ctx, cache, rng),
        }
    }
}

// ── Shared policies ───────────────────────────────────────────────────────────

/// Lets parallel runs share one policy by reference.
impl<P: RoutingPolicy + ?Sized> RoutingPolicy for &P {
    fn origin_path(
        &self,
        network: &RoadNetwork,
        origin:  NodeId,
        sink:    NodeId,
    ) -> RoutingResult<Route> {
        (**self).origin_path(network, origin, sink)
    }

    fn next_hop(
        &self,
        driver: &mut Driver,
        at:     NodeId,
        ctx:    &RouteContext<'_>,
        cache:  &mut SinkPathCache,
        rng:    &mut SimRng,
    ) -> RoutingResult<NodeId> {
        (**self).next_hop(driver, at, ctx, cache, rng)
    }
}
