//! Per-run cache of shortest-path next hops towards the sink.
//!
//! Erratic drivers that stay on course need "the second node of the shortest
//! path from here to the sink".  The network and sink are fixed for a run, so
//! the answer for a given node never changes; it is computed once on first
//! request and reused for every later driver at that node.
//!
//! A cache belongs to exactly one run.  A fresh run builds a fresh cache.

use rustc_hash::FxHashMap;

use cq_core::NodeId;
use cq_network::{RoadNetwork, Router};

use crate::{RoutingError, RoutingResult};

/// Lazily populated `node → next hop towards sink` table.
pub struct SinkPathCache {
    sink:   NodeId,
    next:   FxHashMap<NodeId, NodeId>,
    misses: u64,
    hits:   u64,
}

impl SinkPathCache {
    pub fn new(sink: NodeId) -> Self {
        Self {
            sink,
            next:   FxHashMap::default(),
            misses: 0,
            hits:   0,
        }
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Next node on the shortest path from `from` to the sink.
    ///
    /// Returns `from` itself when it already is the sink.
    pub fn next_hop<R: Router + ?Sized>(
        &mut self,
        router:  &R,
        network: &RoadNetwork,
        from:    NodeId,
    ) -> RoutingResult<NodeId> {
        if let Some(&hop) = self.next.get(&from) {
            self.hits += 1;
            return Ok(hop);
        }
        self.misses += 1;

        let route = router
            .route(network, from, self.sink)
            .map_err(|e| RoutingError::from_network(e, self.sink))?;
        let hop = route.nodes.get(1).copied().unwrap_or(from);
        self.next.insert(from, hop);
        Ok(hop)
    }

    /// Number of nodes whose next hop is known.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
