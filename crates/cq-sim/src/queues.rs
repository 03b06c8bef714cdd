//! Per-node FIFO queues of waiting drivers.
//!
//! Queues live here rather than on the road graph so the same
//! `RoadNetwork` can back many concurrent runs.  A node's queue is created
//! the first time a driver is enqueued there and is never dropped, so the
//! sink queue keeps its arrival order for the whole run.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use thiserror::Error;

use cq_core::{DriverId, NodeId};
use cq_driver::Driver;

/// A dequeue found nothing to release.  Consumed by the tick loop, which
/// responds by dropping the node from the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no driver waiting at {0}")]
pub struct QueueEmpty(pub NodeId);

/// `NodeId → VecDeque<Driver>`; owns every driver not currently in flight.
#[derive(Debug, Default)]
pub struct NodeQueues {
    queues: FxHashMap<NodeId, VecDeque<Driver>>,
}

impl NodeQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `driver` to the back of `node`'s queue.
    #[inline]
    pub fn enqueue(&mut self, node: NodeId, driver: Driver) {
        self.queues.entry(node).or_default().push_back(driver);
    }

    /// Pop the driver at the head of `node`'s queue.
    #[inline]
    pub fn dequeue_front(&mut self, node: NodeId) -> Result<Driver, QueueEmpty> {
        self.queues
            .get_mut(&node)
            .and_then(VecDeque::pop_front)
            .ok_or(QueueEmpty(node))
    }

    /// Put a released driver back at the head, undoing `dequeue_front`.
    pub(crate) fn restore_front(&mut self, node: NodeId, driver: Driver) {
        self.queues.entry(node).or_default().push_front(driver);
    }

    /// Ids waiting at `node`, head first.
    pub fn snapshot(&self, node: NodeId) -> Vec<DriverId> {
        self.drivers_at(node).map(|d| d.id).collect()
    }

    /// Borrowing view of `node`'s queue, head first.
    pub fn drivers_at(&self, node: NodeId) -> impl Iterator<Item = &Driver> {
        self.queues.get(&node).into_iter().flatten()
    }

    pub fn len_at(&self, node: NodeId) -> usize {
        self.queues.get(&node).map_or(0, VecDeque::len)
    }

    /// Every queued driver in unspecified node order.
    pub fn iter_drivers(&self) -> impl Iterator<Item = &Driver> {
        self.queues.values().flatten()
    }

    /// Drivers across all queues.
    pub fn total_len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Nodes that currently hold at least one driver.
    pub fn occupied_nodes(&self) -> usize {
        self.queues.values().filter(|q| !q.is_empty()).count()
    }
}
