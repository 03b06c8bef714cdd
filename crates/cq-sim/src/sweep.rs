//! Repeated runs over a grid of erratic-population settings.
//!
//! A sweep answers "how does commute time degrade as erratic drivers become
//! more common and more erratic?".  Every (point, repetition) pair is an
//! independent run with its own queues, active set and RNG.  All runs borrow
//! the same network and policy.
//!
//! Per-run seeds are drawn up front from the plan's base seed, so results
//! are identical with and without the `parallel` feature.

use tracing::{debug, info};

use cq_core::{DriverClass, SimRng};
use cq_network::RoadNetwork;
use cq_routing::RoutingPolicy;

use crate::{NoopObserver, RunOutcome, SimBuilder, SimConfig, SimResult};

/// One parameter combination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    pub erratic_fraction:       f64,
    pub wrong_turn_probability: f64,
}

/// Cartesian product, erratic fraction outermost.
pub fn grid(erratic_fractions: &[f64], wrong_turn_probabilities: &[f64]) -> Vec<SweepPoint> {
    erratic_fractions
        .iter()
        .flat_map(|&erratic_fraction| {
            wrong_turn_probabilities.iter().map(move |&wrong_turn_probability| SweepPoint {
                erratic_fraction,
                wrong_turn_probability,
            })
        })
        .collect()
}

/// What to run.  `base` supplies everything except the two swept
/// probabilities and the per-run seed.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub base:           SimConfig,
    pub points:         Vec<SweepPoint>,
    pub runs_per_point: usize,
}

/// One finished run.
#[derive(Debug)]
pub struct SweepRun {
    pub point:  SweepPoint,
    /// Repetition index within the point.
    pub run:    usize,
    pub seed:   u64,
    pub result: SimResult<RunOutcome>,
}

/// Run every point `runs_per_point` times.
///
/// Results come back in plan order (point-major) regardless of how they
/// were scheduled.
pub fn run_sweep<P: RoutingPolicy>(
    network: &RoadNetwork,
    policy:  &P,
    plan:    &SweepPlan,
) -> Vec<SweepRun> {
    let mut root = SimRng::new(plan.base.seed);
    let jobs: Vec<(SweepPoint, usize, u64)> = plan
        .points
        .iter()
        .flat_map(|&p| (0..plan.runs_per_point).map(move |r| (p, r)))
        .enumerate()
        .map(|(i, (p, r))| (p, r, root.child(i as u64).random::<u64>()))
        .collect();

    info!(points = plan.points.len(), runs = jobs.len(), "sweep started");

    let run_one = |(point, run, seed): (SweepPoint, usize, u64)| {
        let config = SimConfig {
            erratic_fraction: point.erratic_fraction,
            wrong_turn_probability: point.wrong_turn_probability,
            seed,
            ..plan.base.clone()
        };
        let result = SimBuilder::new(config, network)
            .policy(policy)
            .build()
            .and_then(|mut sim| sim.run(&mut NoopObserver));
        debug!(
            erratic_fraction = point.erratic_fraction,
            wrong_turn       = point.wrong_turn_probability,
            run,
            ok               = result.is_ok(),
            "sweep run finished"
        );
        SweepRun { point, run, seed, result }
    };

    #[cfg(not(feature = "parallel"))]
    {
        jobs.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.into_par_iter().map(run_one).collect()
    }
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Aggregate of all runs at one point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSummary {
    pub point: SweepPoint,
    pub runs: usize,
    /// Runs in which every driver arrived.
    pub converged: usize,
    /// Runs that hit `max_ticks`.
    pub unconverged: usize,
    /// Runs that ended in an error.
    pub failed: usize,
    /// Mean termination tick over converged runs.
    pub mean_ticks: Option<f64>,
    /// Mean of per-run mean arrival ticks over converged runs,
    /// `[disciplined, erratic]`.
    pub mean_arrival_tick: [Option<f64>; 2],
}

/// One summary per distinct point, in first-seen order.
pub fn summarize(runs: &[SweepRun]) -> Vec<PointSummary> {
    let mut points: Vec<SweepPoint> = Vec::new();
    for r in runs {
        if !points.contains(&r.point) {
            points.push(r.point);
        }
    }

    points
        .into_iter()
        .map(|point| {
            let at_point: Vec<&SweepRun> = runs.iter().filter(|r| r.point == point).collect();
            let converged: Vec<_> = at_point
                .iter()
                .filter_map(|r| match &r.result {
                    Ok(RunOutcome::Terminated(report)) => Some(report),
                    _ => None,
                })
                .collect();
            let unconverged = at_point
                .iter()
                .filter(|r| matches!(r.result, Ok(RunOutcome::DidNotConverge(_))))
                .count();
            let failed = at_point.iter().filter(|r| r.result.is_err()).count();

            let mean_ticks = mean(converged.iter().map(|r| r.ticks.0 as f64));
            let mean_arrival_tick = DriverClass::ALL
                .map(|class| mean(converged.iter().filter_map(|r| r.mean_arrival_tick(class))));

            PointSummary {
                point,
                runs: at_point.len(),
                converged: converged.len(),
                unconverged,
                failed,
                mean_ticks,
                mean_arrival_tick,
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
