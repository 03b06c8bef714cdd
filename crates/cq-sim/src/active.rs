//! The set of nodes that may have drivers to release.

use rustc_hash::FxHashSet;

use cq_core::NodeId;

/// Insertion-ordered set of active nodes.
///
/// Iteration order is the order in which nodes were (re)inserted, which
/// fixes the release order inside a tick and keeps runs reproducible.
/// Membership tests are O(1); removal is O(len), which is fine because a
/// node is only removed once its queue has drained.
#[derive(Debug, Default, Clone)]
pub struct ActiveNodes {
    order:   Vec<NodeId>,
    members: FxHashSet<NodeId>,
}

impl ActiveNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a path, keeping path order and skipping repeats.
    pub fn from_path(nodes: &[NodeId]) -> Self {
        let mut set = Self::new();
        for &n in nodes {
            set.insert(n);
        }
        set
    }

    /// Mark `node` active.  Returns `false` if it already was.
    pub fn insert(&mut self, node: NodeId) -> bool {
        if self.members.insert(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    /// Returns `false` if `node` was not active.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if self.members.remove(&node) {
            self.order.retain(|&n| n != node);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Owned copy of the current order; the tick pass iterates this while
    /// the set itself is being edited.
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }
}
