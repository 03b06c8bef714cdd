//! The `Sim` struct and its tick loop.

use rustc_hash::FxHashSet;
use tracing::{debug, info, trace, warn};

use cq_core::{DriverId, NodeId, SimRng, Tick};
use cq_driver::{Driver, DriverPool};
use cq_network::{RoadNetwork, Route};
use cq_routing::{RouteContext, RoutingPolicy, SinkPathCache};

use crate::{
    ActiveNodes, ArrivalRecorder, NodeQueues, QueueEmpty, RunOutcome, RunReport, SimConfig,
    SimError, SimObserver, SimResult, SimState, TickStats,
};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One simulation run.
///
/// `Sim<P>` owns all mutable run state and borrows the network, so any
/// number of runs can share one `RoadNetwork`.  Each tick has a release
/// pass and an apply pass (see the crate docs).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<'n, P: RoutingPolicy> {
    pub config: SimConfig,

    /// Waiting drivers, per node.
    pub queues: NodeQueues,

    /// Nodes visited by the release pass, in order.
    pub active: ActiveNodes,

    pub recorder: ArrivalRecorder,

    network:     &'n RoadNetwork,
    policy:      P,
    origin_path: Route,
    cache:       SinkPathCache,
    rng:         SimRng,
    population:  FxHashSet<DriverId>,
    tick:        Tick,
    state:       SimState,
}

impl<'n, P: RoutingPolicy> Sim<'n, P> {
    /// Queue the whole population at the origin and seed the active set
    /// with the origin path.
    pub(crate) fn new(
        config:      SimConfig,
        network:     &'n RoadNetwork,
        policy:      P,
        origin_path: Route,
        pool:        DriverPool,
        rng:         SimRng,
    ) -> Self {
        let population: FxHashSet<DriverId> = pool.ids().collect();
        let mut queues = NodeQueues::new();
        for driver in pool.into_drivers() {
            queues.enqueue(config.origin, driver);
        }

        let mut sim = Self {
            active:   ActiveNodes::from_path(&origin_path.nodes),
            cache:    SinkPathCache::new(config.sink),
            recorder: ArrivalRecorder::new(),
            config,
            queues,
            network,
            policy,
            origin_path,
            rng,
            population,
            tick:     Tick::ZERO,
            state:    SimState::Running,
        };

        // Everyone may already be home (origin == sink, or nobody to move).
        let sink = sim.config.sink;
        sim.recorder.observe(Tick::ZERO, sim.queues.drivers_at(sink));
        if sim.all_arrived() {
            sim.state = SimState::Terminated;
        }
        sim
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every driver is at the sink, or until `config.max_ticks`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        while self.state == SimState::Running {
            if self.config.max_ticks.is_some_and(|limit| self.tick.0 >= limit) {
                warn!(
                    ticks      = self.tick.0,
                    arrived    = self.queues.len_at(self.config.sink),
                    population = self.population.len(),
                    "tick limit reached before every driver arrived"
                );
                observer.on_sim_end(self.tick, self.state);
                return Ok(RunOutcome::DidNotConverge(self.report()));
            }
            self.step(observer)?;
        }

        info!(
            ticks      = self.tick.0,
            population = self.population.len(),
            "all drivers reached the sink"
        );
        observer.on_sim_end(self.tick, self.state);
        Ok(RunOutcome::Terminated(self.report()))
    }

    /// Run at most `n` ticks, stopping early on termination.  Ignores
    /// `max_ticks`.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<SimState> {
        for _ in 0..n {
            if self.state == SimState::Terminated {
                break;
            }
            self.step(observer)?;
        }
        Ok(self.state)
    }

    /// Advance one tick.  A terminated sim is left untouched.
    ///
    /// On a routing failure, moves staged earlier in the same tick are still
    /// applied and the failing driver goes back to the head of its queue,
    /// so the partial report accounts for every driver.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        if self.state == SimState::Terminated {
            return Ok(TickStats {
                tick:         self.tick,
                active_nodes: self.active.len(),
                ..TickStats::default()
            });
        }

        let now = self.tick.next();
        let sink = self.config.sink;
        observer.on_tick_start(now);

        // ── Release pass ──────────────────────────────────────────────────
        //
        // Moves are staged, not applied, so a driver released at A and
        // headed to B cannot also be released by B later in this pass.
        let ctx = RouteContext::new(
            self.network,
            &self.origin_path,
            sink,
            self.config.wrong_turn_probability,
        );
        let mut staged: Vec<(NodeId, NodeId, Driver)> = Vec::with_capacity(self.active.len());
        let mut failure = None;

        for node in self.active.snapshot() {
            if node == sink {
                continue;
            }
            let mut driver = match self.queues.dequeue_front(node) {
                Ok(d) => d,
                Err(QueueEmpty(_)) => {
                    self.active.remove(node);
                    continue;
                }
            };
            match self.policy.next_hop(&mut driver, node, &ctx, &mut self.cache, &mut self.rng) {
                Ok(hop) => {
                    driver.record_hop();
                    staged.push((node, hop, driver));
                }
                Err(err) => {
                    self.queues.restore_front(node, driver);
                    failure = Some(err);
                    break;
                }
            }
        }

        // ── Apply pass ────────────────────────────────────────────────────
        let moved = staged.len();
        for (from, to, driver) in staged {
            trace!(
                tick       = now.0,
                driver     = %driver.id,
                %from,
                %to,
                iterations = driver.iterations,
                "move"
            );
            if to == sink {
                observer.on_arrival(now, &driver);
            }
            self.queues.enqueue(to, driver);
            self.active.insert(to);
        }

        // ── Observe ───────────────────────────────────────────────────────
        self.tick = now;
        let arrived = self.recorder.observe(now, self.queues.drivers_at(sink));

        if let Some(source) = failure {
            warn!(tick = now.0, error = %source, "run aborted");
            return Err(SimError::Aborted {
                tick:    now,
                source,
                partial: Box::new(self.report()),
            });
        }

        if self.all_arrived() {
            self.state = SimState::Terminated;
        }

        let stats = TickStats {
            tick: now,
            active_nodes: self.active.len(),
            moved,
            arrived,
        };
        debug!(
            tick        = now.0,
            active      = stats.active_nodes,
            moved,
            disciplined = arrived[0],
            erratic     = arrived[1],
            "tick complete"
        );
        observer.on_tick_end(&stats, &self.queues);
        Ok(stats)
    }

    /// Snapshot of the results so far.
    pub fn report(&self) -> RunReport {
        let sink = self.config.sink;
        RunReport {
            ticks:            self.tick,
            iteration_counts: ArrivalRecorder::iteration_counts(self.queues.drivers_at(sink)),
            arrival_curves:   self.recorder.curves().clone(),
            arrived:          self.queues.len_at(sink),
            population:       self.population.len(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Last completed tick (0 before the first step).
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// The path disciplined drivers follow.
    pub fn origin_path(&self) -> &Route {
        &self.origin_path
    }

    pub fn network(&self) -> &'n RoadNetwork {
        self.network
    }

    pub fn population(&self) -> usize {
        self.population.len()
    }

    /// `(hits, misses)` of the erratic shortest-path cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// The sink's id set equals the population.
    fn all_arrived(&self) -> bool {
        let sink = self.config.sink;
        if self.queues.len_at(sink) != self.population.len() {
            return false;
        }
        let present: FxHashSet<DriverId> = self.queues.drivers_at(sink).map(|d| d.id).collect();
        present == self.population
    }
}
