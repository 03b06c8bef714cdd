use cq_core::{CoreError, Tick};
use cq_network::NetworkError;
use cq_routing::RoutingError;
use thiserror::Error;

use crate::RunReport;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] CoreError),

    /// An endpoint is missing, or no origin→sink path exists.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("driver pool has {got} drivers but driver_count is {expected}")]
    PopulationMismatch { expected: usize, got: usize },

    /// A routing failure mid-run, during `tick`.  `partial` reports that
    /// tick: moves released before the failure are applied and observed,
    /// and the failing driver is back at the head of its queue.
    #[error("run aborted during {tick}: {source}")]
    Aborted {
        tick:    Tick,
        source:  RoutingError,
        partial: Box<RunReport>,
    },
}

impl SimError {
    /// Classify a failure to plan the origin path before the first tick.
    pub(crate) fn from_planning(err: RoutingError) -> Self {
        match err {
            RoutingError::UnreachableSink { from, sink } => {
                SimError::Network(NetworkError::NoRoute { from, to: sink })
            }
            RoutingError::Network(e) => SimError::Network(e),
            off_path => SimError::Aborted {
                tick:    Tick::ZERO,
                source:  off_path,
                partial: Box::default(),
            },
        }
    }

    /// The partial report carried by an abort.
    pub fn partial_report(&self) -> Option<&RunReport> {
        match self {
            SimError::Aborted { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
