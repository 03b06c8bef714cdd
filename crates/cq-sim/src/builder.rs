//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use cq_core::SimRng;
use cq_driver::DriverPool;
use cq_network::{DijkstraRouter, RoadNetwork};
use cq_routing::{ClassRouting, RoutingPolicy};

use crate::{Sim, SimConfig, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: endpoints, population, probabilities, seed
/// - `&RoadNetwork`: borrowed for the lifetime of the sim
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                         |
/// |-----------------|-------------------------------------------------|
/// | `.policy(p)`    | [`ClassRouting`] over Dijkstra                  |
/// | `.drivers(d)`   | `DriverPool::generate` from the config and seed |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, &network)
///     .drivers(DriverPool::from_classes(&classes))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<'n, P: RoutingPolicy = ClassRouting> {
    config:  SimConfig,
    network: &'n RoadNetwork,
    policy:  P,
    drivers: Option<DriverPool>,
}

impl<'n> SimBuilder<'n> {
    pub fn new(config: SimConfig, network: &'n RoadNetwork) -> Self {
        Self {
            config,
            network,
            policy:  ClassRouting::new(DijkstraRouter),
            drivers: None,
        }
    }
}

impl<'n, P: RoutingPolicy> SimBuilder<'n, P> {
    /// Replace the routing policy.
    pub fn policy<Q: RoutingPolicy>(self, policy: Q) -> SimBuilder<'n, Q> {
        SimBuilder {
            config:  self.config,
            network: self.network,
            policy,
            drivers: self.drivers,
        }
    }

    /// Use a pre-built population instead of generating one.
    ///
    /// Its size must equal `config.driver_count`.  No RNG draws are spent
    /// on class assignment.
    pub fn drivers(mut self, pool: DriverPool) -> Self {
        self.drivers = Some(pool);
        self
    }

    /// Validate the config, create the population, plan the origin path and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<'n, P>> {
        let config = self.config;
        config.validate(self.network)?;

        let mut rng = SimRng::new(config.seed);
        let pool = match self.drivers {
            Some(pool) => {
                if pool.len() != config.driver_count {
                    return Err(SimError::PopulationMismatch {
                        expected: config.driver_count,
                        got:      pool.len(),
                    });
                }
                pool
            }
            None => DriverPool::generate(config.driver_count, config.erratic_fraction, &mut rng)?,
        };

        let origin_path = self
            .policy
            .origin_path(self.network, config.origin, config.sink)
            .map_err(SimError::from_planning)?;

        let [disciplined, erratic] = pool.class_counts();
        debug!(
            origin    = %config.origin,
            sink      = %config.sink,
            hops      = origin_path.hop_count(),
            disciplined,
            erratic,
            seed      = config.seed,
            "sim built"
        );

        Ok(Sim::new(config, self.network, self.policy, origin_path, pool, rng))
    }
}
