//! Run parameters.

use cq_core::{NodeId, check_probability};
use cq_network::RoadNetwork;

use crate::SimResult;

/// Everything a single run needs besides the network and the policy.
///
/// Supplied by the caller; nothing here is read from the environment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Population size.  Ignored when a pool is injected with
    /// [`SimBuilder::drivers`][crate::SimBuilder::drivers], except as a check.
    pub driver_count: usize,

    /// Probability that a generated driver is erratic.
    pub erratic_fraction: f64,

    /// Per-hop probability that an erratic driver takes a random turn.
    pub wrong_turn_probability: f64,

    pub origin: NodeId,
    pub sink:   NodeId,

    /// Master seed for the run's `SimRng`.
    pub seed: u64,

    /// Stop with `RunOutcome::DidNotConverge` after this many ticks.
    /// `None` runs until every driver has arrived.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_ticks: Option<u64>,
}

impl SimConfig {
    /// A disciplined-only, 100-driver run with seed 0 and no tick limit.
    pub fn new(origin: NodeId, sink: NodeId) -> Self {
        Self {
            driver_count:           100,
            erratic_fraction:       0.0,
            wrong_turn_probability: 0.0,
            origin,
            sink,
            seed:                   0,
            max_ticks:              None,
        }
    }

    /// Reject out-of-range probabilities and endpoints missing from `network`.
    pub fn validate(&self, network: &RoadNetwork) -> SimResult<()> {
        check_probability("erratic_fraction", self.erratic_fraction)?;
        check_probability("wrong_turn_probability", self.wrong_turn_probability)?;
        network.check_node(self.origin)?;
        network.check_node(self.sink)?;
        Ok(())
    }
}
