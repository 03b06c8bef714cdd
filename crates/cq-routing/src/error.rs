use cq_core::{DriverId, NodeId};
use cq_network::NetworkError;
use thiserror::Error;

/// Fatal routing failures.  Either one aborts the run.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A disciplined driver was released at a node that is not on the
    /// origin→sink path (or is its last node).
    #[error("disciplined driver {driver} found off the origin path at {node}")]
    OffPath { driver: DriverId, node: NodeId },

    #[error("sink {sink} is unreachable from {from}")]
    UnreachableSink { from: NodeId, sink: NodeId },

    #[error("network error: {0}")]
    Network(NetworkError),
}

impl RoutingError {
    /// Map a router failure on a query towards `sink`.  `NoRoute` becomes
    /// `UnreachableSink`; anything else is passed through.
    pub fn from_network(err: NetworkError, sink: NodeId) -> Self {
        match err {
            NetworkError::NoRoute { from, .. } => RoutingError::UnreachableSink { from, sink },
            other => RoutingError::Network(other),
        }
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;
