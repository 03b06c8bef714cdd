//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected but stored as pairs of directed half-edges in
//! **Compressed Sparse Row (CSR)** format.  Given a `NodeId n`, its
//! half-edges occupy
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! so the neighbour list of a node is a contiguous slice.  Random-turn
//! selection borrows that slice directly, and Dijkstra's inner loop is a
//! linear scan.
//!
//! # Labels
//!
//! Road data identifies intersections by opaque external ids (64-bit OSM
//! node ids in the Burlington extracts).  The builder maps every label to a
//! dense `NodeId` in first-seen order; [`RoadNetwork::node_for_label`] and
//! [`RoadNetwork::label`] translate in both directions.

use std::collections::HashMap;

use cq_core::{EdgeId, NodeId};

use crate::{NetworkError, NetworkResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected road graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// External label of each node.  Indexed by `NodeId`.
    pub node_label: Vec<u64>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Half-edges leaving node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Half-edge data (indexed by EdgeId) ────────────────────────────────
    /// Source node of each half-edge.  Needed to walk `prev_edge` chains
    /// back to the source during route reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each half-edge.
    pub edge_to: Vec<NodeId>,

    /// Segment length.  This is the Dijkstra cost.
    pub edge_length: Vec<f64>,

    label_index: HashMap<u64, NodeId>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_label.len()
    }

    /// Number of directed half-edges (twice the number of road segments).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// Number of undirected road segments.
    pub fn road_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_label.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// `Ok(node)` if `node` belongs to this network.
    pub fn check_node(&self, node: NodeId) -> NetworkResult<NodeId> {
        if self.contains(node) {
            Ok(node)
        } else {
            Err(NetworkError::NodeNotFound(node))
        }
    }

    // ── Labels ────────────────────────────────────────────────────────────

    /// Dense id of the node carrying external `label`.
    pub fn node_for_label(&self, label: u64) -> NetworkResult<NodeId> {
        self.label_index
            .get(&label)
            .copied()
            .ok_or(NetworkError::UnknownLabel(label))
    }

    /// External label of `node`.
    #[inline]
    pub fn label(&self, node: NodeId) -> u64 {
        self.node_label[node.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all half-edges leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Neighbours of `node` as a contiguous slice, in ascending `NodeId`
    /// order.  No allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        &self.edge_to[start..end]
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// `true` if a road segment joins `a` and `b`.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    // ── Summary statistics ────────────────────────────────────────────────

    /// Undirected graph density: `2m / (n (n - 1))`.  `0.0` below two nodes.
    pub fn density(&self) -> f64 {
        let n = self.node_count() as f64;
        if n < 2.0 {
            return 0.0;
        }
        self.edge_count() as f64 / (n * (n - 1.0))
    }

    /// `hist[d]` = number of nodes with degree `d`.
    pub fn degree_histogram(&self) -> Vec<usize> {
        let max = (0..self.node_count() as u32)
            .map(|n| self.degree(NodeId(n)))
            .max()
            .unwrap_or(0);
        let mut hist = vec![0usize; max + 1];
        for n in 0..self.node_count() as u32 {
            hist[self.degree(NodeId(n))] += 1;
        }
        hist
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Segments may be added in any order.  `build()` drops self-loops, keeps
/// the shortest of any parallel segments, sorts half-edges by source node,
/// and lays out the CSR arrays.
///
/// # Example
///
/// ```
/// use cq_network::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(204449959);
/// let c = b.add_node(204350837);
/// b.add_road(a, c, 120.5);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // one half-edge per direction
/// ```
pub struct RoadNetworkBuilder {
    labels:      Vec<u64>,
    label_index: HashMap<u64, NodeId>,
    raw_edges:   Vec<RawEdge>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    length: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            labels:      Vec::new(),
            label_index: HashMap::new(),
            raw_edges:   Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and road segments.
    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            labels:      Vec::with_capacity(nodes),
            label_index: HashMap::with_capacity(nodes),
            raw_edges:   Vec::with_capacity(roads * 2),
        }
    }

    /// Return the `NodeId` for `label`, adding a new node on first sight.
    pub fn add_node(&mut self, label: u64) -> NodeId {
        if let Some(&id) = self.label_index.get(&label) {
            return id;
        }
        let id = NodeId(self.labels.len() as u32);
        self.labels.push(label);
        self.label_index.insert(label, id);
        id
    }

    /// Add an undirected road segment of the given `length` between `a` and
    /// `b`.  `length` must be finite and non-negative.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length: f64) {
        debug_assert!(length.is_finite() && length >= 0.0, "bad length {length}");
        self.raw_edges.push(RawEdge { from: a, to: b, length });
        self.raw_edges.push(RawEdge { from: b, to: a, length });
    }

    /// Convenience: add both endpoints by label, then the segment.
    pub fn add_labelled_road(&mut self, u: u64, v: u64, length: f64) {
        let a = self.add_node(u);
        let b = self.add_node(v);
        self.add_road(a, b, length);
    }

    pub fn node_count(&self) -> usize { self.labels.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the half-edge sort.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.labels.len();

        // Sort by (from, to, length) so duplicates sit together with the
        // shortest first; dedup keeps that one.
        let mut raw: Vec<RawEdge> = self
            .raw_edges
            .into_iter()
            .filter(|e| e.from != e.to)
            .collect();
        raw.sort_unstable_by(|x, y| {
            (x.from, x.to)
                .cmp(&(y.from, y.to))
                .then(x.length.total_cmp(&y.length))
        });
        raw.dedup_by(|later, first| later.from == first.from && later.to == first.to);

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f64>    = raw.iter().map(|e| e.length).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        RoadNetwork {
            node_label: self.labels,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            label_index: self.label_index,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
