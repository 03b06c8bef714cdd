//! Unit tests for cq-routing.

use cq_core::NodeId;
use cq_network::{DijkstraRouter, RoadNetwork, RoadNetworkBuilder};

use crate::ClassRouting;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Four-node cycle A–B–C–D–A, unit lengths.  Returns `[A, B, C, D]`.
fn cycle4() -> (RoadNetwork, [NodeId; 4]) {
    let mut b = RoadNetworkBuilder::new();
    let a = b.add_node(1);
    let bb = b.add_node(2);
    let c = b.add_node(3);
    let d = b.add_node(4);
    b.add_road(a, bb, 1.0);
    b.add_road(bb, c, 1.0);
    b.add_road(c, d, 1.0);
    b.add_road(d, a, 1.0);
    (b.build(), [a, bb, c, d])
}

fn policy() -> ClassRouting {
    ClassRouting::new(DijkstraRouter)
}

// ── Disciplined ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod disciplined {
    use cq_core::{DriverClass, DriverId, SimRng};
    use cq_driver::Driver;

    use super::*;
    use crate::{RouteContext, RoutingError, RoutingPolicy, SinkPathCache};

    #[test]
    fn follows_origin_path() {
        let (net, [a, b, c, _]) = cycle4();
        let p = policy();
        let path = p.origin_path(&net, a, c).unwrap();
        assert_eq!(path.nodes, vec![a, b, c]);

        let ctx = RouteContext::new(&net, &path, c, 0.0);
        let mut cache = SinkPathCache::new(c);
        let mut rng = SimRng::new(0);
        let mut d = Driver::new(DriverId(0), DriverClass::Disciplined);

        assert_eq!(p.next_hop(&mut d, a, &ctx, &mut cache, &mut rng).unwrap(), b);
        assert_eq!(p.next_hop(&mut d, b, &ctx, &mut cache, &mut rng).unwrap(), c);
        assert!(d.path_history.is_empty());
        assert_eq!(d.iterations, 0, "policy never counts hops");
    }

    #[test]
    fn off_path_is_fatal() {
        let (net, [a, _, c, d_node]) = cycle4();
        let p = policy();
        let path = p.origin_path(&net, a, c).unwrap();
        let ctx = RouteContext::new(&net, &path, c, 0.0);
        let mut cache = SinkPathCache::new(c);
        let mut rng = SimRng::new(0);
        let mut d = Driver::new(DriverId(4), DriverClass::Disciplined);

        let err = p.next_hop(&mut d, d_node, &ctx, &mut cache, &mut rng).unwrap_err();
        assert!(matches!(err, RoutingError::OffPath { driver: DriverId(4), node } if node == d_node));

        // The sink is the last path node; there is nowhere further to go.
        let err = p.next_hop(&mut d, c, &ctx, &mut cache, &mut rng).unwrap_err();
        assert!(matches!(err, RoutingError::OffPath { .. }));
    }

    #[test]
    fn disciplined_never_draws_randomness() {
        let (net, [a, _, c, _]) = cycle4();
        let p = policy();
        let path = p.origin_path(&net, a, c).unwrap();
        let ctx = RouteContext::new(&net, &path, c, 0.5);
        let mut cache = SinkPathCache::new(c);
        let mut rng = SimRng::new(3);
        let mut d = Driver::new(DriverId(0), DriverClass::Disciplined);
        p.next_hop(&mut d, a, &ctx, &mut cache, &mut rng).unwrap();
        assert_eq!(rng.random::<u64>(), SimRng::new(3).random::<u64>());
    }
}

// ── Erratic ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod erratic {
    use cq_core::{DriverClass, DriverId, SimRng};
    use cq_driver::Driver;

    use super::*;
    use crate::{RouteContext, RoutingError, RoutingPolicy, SinkPathCache};

    #[test]
    fn never_deviating_takes_shortest_path_and_records_history() {
        let (net, [a, b, c, d]) = cycle4();
        let p = policy();
        let path = p.origin_path(&net, a, c).unwrap();
        let ctx = RouteContext::new(&net, &path, c, 0.0);
        let mut cache = SinkPathCache::new(c);
        let mut rng = SimRng::new(1);
        let mut drv = Driver::new(DriverId(0), DriverClass::Erratic);

        assert_eq!(p.next_hop(&mut drv, a, &ctx, &mut cache, &mut rng).unwrap(), b);
        // From D (off the disciplined path) the own shortest path leads to C.
        assert_eq!(p.next_hop(&mut drv, d, &ctx, &mut cache, &mut rng).unwrap(), c);
        assert_eq!(drv.path_history, vec![a, d]);
    }

    #[test]
    fn always_deviating_picks_a_neighbour_without_history() {
        let (net, [a, b, c, d]) = cycle4();
        let p = policy();
        let path = p.origin_path(&net, a, c).unwrap();
        let ctx = RouteContext::new(&net, &path, c, 1.0);
        let mut cache = SinkPathCache::new(c);
        let mut rng = SimRng::new(2);
        let mut drv = Driver::new(DriverId(0), DriverClass::Erratic);

        let mut seen_b = false;
        let mut seen_d = false;
        for _ in 0..200 {
            let hop = p.next_hop(&mut drv, a, &ctx, &mut cache, &mut rng).unwrap();
            assert!(hop == b || hop == d, "{hop} is not a neighbour of A");
            seen_b |= hop == b;
            seen_d |= hop == d;
        }
        assert!(seen_b && seen_d, "both neighbours should be chosen eventually");
        assert!(drv.path_history.is_empty());
        assert!(cache.is_empty(), "random turns never consult the path cache");
    }

    #[test]
    fn isolated_node_is_unreachable() {
        let mut bld = RoadNetworkBuilder::new();
        let lone = bld.add_node(1);
        let a = bld.add_node(2);
        let c = bld.add_node(3);
        bld.add_road(a, c, 1.0);
        let net = bld.build();

        let p = policy();
        let path = p.origin_path(&net, a, c).unwrap();
        let mut cache = SinkPathCache::new(c);
        let mut rng = SimRng::new(0);
        let mut drv = Driver::new(DriverId(0), DriverClass::Erratic);

        let deviate = RouteContext::new(&net, &path, c, 1.0);
        let err = p.next_hop(&mut drv, lone, &deviate, &mut cache, &mut rng).unwrap_err();
        assert!(matches!(err, RoutingError::UnreachableSink { from, .. } if from == lone));

        let stay = RouteContext::new(&net, &path, c, 0.0);
        let err = p.next_hop(&mut drv, lone, &stay, &mut cache, &mut rng).unwrap_err();
        assert!(matches!(err, RoutingError::UnreachableSink { from, sink } if from == lone && sink == c));
    }
}

// ── Origin path & cache ───────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use super::*;
    use crate::{RoutingError, RoutingPolicy, SinkPathCache};

    #[test]
    fn second_lookup_is_a_hit() {
        let (net, [a, b, c, _]) = cycle4();
        let mut cache = SinkPathCache::new(c);
        assert_eq!(cache.next_hop(&DijkstraRouter, &net, a).unwrap(), b);
        assert_eq!(cache.next_hop(&DijkstraRouter, &net, a).unwrap(), b);
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.sink(), c);
    }

    #[test]
    fn at_sink_stays_put() {
        let (net, [_, _, c, _]) = cycle4();
        let mut cache = SinkPathCache::new(c);
        assert_eq!(cache.next_hop(&DijkstraRouter, &net, c).unwrap(), c);
    }

    #[test]
    fn disconnected_origin_path_is_unreachable() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(1);
        let c = b.add_node(2);
        let net = b.build();
        let err = policy().origin_path(&net, a, c).unwrap_err();
        assert!(matches!(err, RoutingError::UnreachableSink { .. }));
    }

    #[test]
    fn unknown_node_passes_through_as_network_error() {
        let (net, [a, ..]) = cycle4();
        let err = policy().origin_path(&net, a, NodeId(40)).unwrap_err();
        assert!(matches!(err, RoutingError::Network(_)));
    }
}
