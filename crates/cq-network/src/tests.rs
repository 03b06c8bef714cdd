//! Unit tests for cq-network.
//!
//! All tests use hand-crafted networks so they run without any road data.

#[cfg(test)]
mod helpers {
    use cq_core::NodeId;
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Small network with two competing routes.
    ///
    /// ```text
    ///   0 ── 1 ── 2
    ///   │         │
    ///   3 ─────── 4
    /// ```
    ///
    /// Path 0→1→2→4 has length 30; path 0→3→4 has length 60.
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(100);
        let n1 = b.add_node(101);
        let n2 = b.add_node(102);
        let n3 = b.add_node(103);
        let n4 = b.add_node(104);

        b.add_road(n0, n1, 10.0);
        b.add_road(n1, n2, 10.0);
        b.add_road(n2, n4, 10.0);
        b.add_road(n0, n3, 50.0); // long detour
        b.add_road(n3, n4, 10.0);

        (b.build(), [n0, n1, n2, n3, n4])
    }

    /// Four-node cycle A–B–C–D–A with unit lengths.
    pub fn cycle4() -> (RoadNetwork, [NodeId; 4]) {
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
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cq_core::NodeId;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert_eq!(net.density(), 0.0);
    }

    #[test]
    fn single_road_is_bidirectional() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(7);
        let c = b.add_node(9);
        b.add_road(a, c, 1_000.0);
        let net = b.build();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.road_count(), 1);
        assert_eq!(net.neighbors(a), &[c]);
        assert_eq!(net.neighbors(c), &[a]);
    }

    #[test]
    fn labels_map_both_ways() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(204_449_959);
        let again = b.add_node(204_449_959);
        assert_eq!(a, again, "re-adding a label returns the same node");
        let net = b.build();
        assert_eq!(net.node_for_label(204_449_959).unwrap(), a);
        assert_eq!(net.label(a), 204_449_959);
        assert!(net.node_for_label(1).is_err());
    }

    #[test]
    fn parallel_roads_keep_shortest_and_self_loops_drop() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(1);
        let c = b.add_node(2);
        b.add_road(a, c, 9.0);
        b.add_road(a, c, 4.0);
        b.add_road(a, a, 1.0);
        let net = b.build();
        assert_eq!(net.road_count(), 1);
        assert_eq!(net.degree(a), 1);
        let e = net.out_edges(a).next().unwrap();
        assert_eq!(net.edge_length[e.index()], 4.0);
    }

    #[test]
    fn csr_neighbors_sorted_and_adjacent() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        assert_eq!(net.neighbors(n0), &[n1, n3]);
        assert_eq!(net.neighbors(n4), &[n2, n3]);
        assert!(net.are_adjacent(n1, n2));
        assert!(!net.are_adjacent(n1, n4));
        for e in net.out_edges(n2) {
            assert_eq!(net.edge_from[e.index()], n2);
        }
    }

    #[test]
    fn check_node_rejects_out_of_range() {
        let (net, _) = super::helpers::grid_network();
        assert!(net.check_node(NodeId(4)).is_ok());
        assert!(net.check_node(NodeId(5)).is_err());
    }

    #[test]
    fn degree_stats() {
        let (net, _) = super::helpers::cycle4();
        assert_eq!(net.degree_histogram(), vec![0, 0, 4]);
        // 4 roads, 4 nodes: 2*4 / (4*3)
        assert!((net.density() - 8.0 / 12.0).abs() < 1e-12);
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use cq_core::NodeId;
    use crate::{DijkstraRouter, NetworkError, RoadNetworkBuilder, Router};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let r = DijkstraRouter.route(&net, n0, n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![n0]);
        assert_eq!(r.hop_count(), 0);
    }

    #[test]
    fn shortest_path_correct() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        let route = DijkstraRouter.route(&net, n0, n4).unwrap();
        assert_eq!(route.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(route.total_length, 30.0);
        assert_eq!(route.hop_count(), 3);
        assert_eq!(route.next_after(n1), Some(n2));
        assert_eq!(route.next_after(n4), None);
    }

    #[test]
    fn mid_route_query_follows_same_corridor() {
        let (net, [_, _, n2, n3, n4]) = super::helpers::grid_network();
        let route = DijkstraRouter.route(&net, n3, n4).unwrap();
        assert_eq!(route.nodes, vec![n3, n4]);
        let route = DijkstraRouter.route(&net, n2, n4).unwrap();
        assert_eq!(route.nodes, vec![n2, n4]);
    }

    #[test]
    fn equal_length_tie_is_deterministic() {
        let (net, [a, b, c, _d]) = super::helpers::cycle4();
        // A→B→C and A→D→C both have length 2; the lower NodeId wins.
        let first = DijkstraRouter.route(&net, a, c).unwrap();
        assert_eq!(first.nodes, vec![a, b, c]);
        for _ in 0..10 {
            assert_eq!(DijkstraRouter.route(&net, a, c).unwrap(), first);
        }
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(1);
        let c = b.add_node(2);
        let net = b.build();
        let result = DijkstraRouter.route(&net, a, c);
        assert!(matches!(result, Err(NetworkError::NoRoute { .. })));
    }

    #[test]
    fn unknown_node_is_an_error() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let result = DijkstraRouter.route(&net, n0, NodeId(99));
        assert!(matches!(result, Err(NetworkError::NodeNotFound(NodeId(99)))));
    }

    #[test]
    fn zero_length_segments_are_routable() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(1);
        let m = b.add_node(2);
        let c = b.add_node(3);
        b.add_road(a, m, 0.0);
        b.add_road(m, c, 0.0);
        let net = b.build();
        let r = DijkstraRouter.route(&net, a, c).unwrap();
        assert_eq!(r.nodes, vec![a, m, c]);
        assert_eq!(r.total_length, 0.0);
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{DijkstraRouter, NetworkError, Router, load_network_reader};

    const EDGES: &str = "\
u,v,length\n\
204449959,11,5.0\n\
11,204350837,5.0\n\
204449959,204350837,25.0\n\
";

    #[test]
    fn loads_labels_and_lengths() {
        let net = load_network_reader(Cursor::new(EDGES)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.road_count(), 3);

        let origin = net.node_for_label(204449959).unwrap();
        let sink   = net.node_for_label(204350837).unwrap();
        let mid    = net.node_for_label(11).unwrap();
        let r = DijkstraRouter.route(&net, origin, sink).unwrap();
        assert_eq!(r.nodes, vec![origin, mid, sink]);
        assert_eq!(r.total_length, 10.0);
    }

    #[test]
    fn duplicate_rows_keep_the_smallest_length_in_any_order() {
        // The later, longer row does not overwrite the earlier one.
        let csv = "u,v,length\n1,2,4.0\n2,1,9.0\n1,1,1.0\n";
        let net = load_network_reader(Cursor::new(csv)).unwrap();
        assert_eq!(net.road_count(), 1);

        let a = net.node_for_label(1).unwrap();
        let b = net.node_for_label(2).unwrap();
        assert_eq!(DijkstraRouter.route(&net, a, b).unwrap().total_length, 4.0);
        assert_eq!(net.neighbors(a), &[b]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "u,v,length,name\n1,2,3.5,Main St\n";
        let net = load_network_reader(Cursor::new(csv)).unwrap();
        assert_eq!(net.road_count(), 1);
    }

    #[test]
    fn negative_length_rejected() {
        let csv = "u,v,length\n1,2,-3.0\n";
        let err = load_network_reader(Cursor::new(csv)).err().unwrap();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn malformed_row_rejected() {
        let csv = "u,v,length\n1,two,3.0\n";
        let err = load_network_reader(Cursor::new(csv)).err().unwrap();
        assert!(matches!(err, NetworkError::Csv(_)));
    }
}
