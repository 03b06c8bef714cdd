//! A single driver.

use cq_core::{DriverClass, DriverId, NodeId};

/// One vehicle in the simulation.
///
/// `id` and `class` never change.  `iterations` counts the ticks on which
/// the driver was released from a queue and moved one hop; it starts at 0.
/// `path_history` is only written for erratic drivers, once per hop they
/// take along their own shortest path to the sink.
///
/// `Driver` is intentionally not `Clone`: at any moment exactly one node
/// queue owns a given driver, and moving it is the only way to transfer it.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub id:           DriverId,
    pub class:        DriverClass,
    pub iterations:   u32,
    pub path_history: Vec<NodeId>,
}

impl Driver {
    /// A fresh driver that has not moved yet.
    pub fn new(id: DriverId, class: DriverClass) -> Self {
        Self {
            id,
            class,
            iterations:   0,
            path_history: Vec::new(),
        }
    }

    /// Account for one hop of travel.
    #[inline]
    pub fn record_hop(&mut self) {
        self.iterations += 1;
    }

    /// Note an on-path step taken from `node`.
    #[inline]
    pub fn record_on_path(&mut self, node: NodeId) {
        self.path_history.push(node);
    }

    #[inline]
    pub fn is_erratic(&self) -> bool {
        self.class.is_erratic()
    }
}
