//! Read-only routing inputs shared by every `next_hop` call of a run.

use cq_core::NodeId;
use cq_network::{RoadNetwork, Route};

/// A read-only view of the run passed to every
/// [`RoutingPolicy`][crate::RoutingPolicy] call.
///
/// Built once when the simulation starts and borrowed for the whole run.
/// Nothing here is mutated, so the same network can back many runs at once.
pub struct RouteContext<'a> {
    pub network: &'a RoadNetwork,

    /// The fixed origin→sink shortest path followed by disciplined drivers.
    pub origin_path: &'a Route,

    pub sink: NodeId,

    /// Per-hop probability that an erratic driver takes a random turn.
    pub wrong_turn_probability: f64,
}

impl<'a> RouteContext<'a> {
    #[inline]
    pub fn new(
        network:                &'a RoadNetwork,
        origin_path:            &'a Route,
        sink:                   NodeId,
        wrong_turn_probability: f64,
    ) -> Self {
        Self { network, origin_path, sink, wrong_turn_probability }
    }
}
