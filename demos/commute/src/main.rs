//! commute — command-line driver for the commute-queue simulator.
//!
//! Runs one simulation (or a parameter sweep) of drivers travelling from an
//! origin intersection to a sink, and reports how long the commute took.
//!
//! # Example
//!
//! ```bash
//! # Built-in town, 200 drivers, a quarter of them erratic
//! commute --drivers 200 --erratic-fraction 0.25 --wrong-turn 0.1 --seed 7
//!
//! # Real edge list, settings from a file, one flag overridden
//! commute --network roads.csv --config run.json --seed 3
//!
//! # Sweep erratic share × wrong-turn probability, 5 runs per point
//! commute --sweep --runs 5
//! ```

mod town;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cq_core::DriverClass;
use cq_network::{DijkstraRouter, RoadNetwork, load_network_csv};
use cq_routing::ClassRouting;
use cq_sim::{
    NoopObserver, RunOutcome, SimBuilder, SimConfig, SimError, SweepPlan, grid, run_sweep,
    summarize,
};

// ── Defaults ──────────────────────────────────────────────────────────────────

const DRIVERS:    usize = 100;
const MAX_TICKS:  u64   = 100_000;
const SWEEP_ERRATIC:    [f64; 6] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
const SWEEP_WRONG_TURN: [f64; 4] = [0.0, 0.1, 0.2, 0.3];

// ── Command line ──────────────────────────────────────────────────────────────

/// Commute-queue simulator
///
/// Drivers leave the origin one per tick and queue at every intersection on
/// the way to the sink.  Erratic drivers sometimes take a random turn.
#[derive(Parser, Debug)]
#[command(name = "commute")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON settings file.  Flags given on the command line win.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV edge list with columns u,v,length.  Defaults to the built-in town.
    #[arg(short, long)]
    network: Option<PathBuf>,

    /// Origin node label
    #[arg(long)]
    origin: Option<u64>,

    /// Sink node label
    #[arg(long)]
    sink: Option<u64>,

    /// Number of drivers
    #[arg(short, long)]
    drivers: Option<usize>,

    /// Share of erratic drivers (0.0-1.0)
    #[arg(short, long)]
    erratic_fraction: Option<f64>,

    /// Per-hop wrong-turn probability of an erratic driver (0.0-1.0)
    #[arg(short, long)]
    wrong_turn: Option<f64>,

    /// Random seed.  When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Sweep erratic share and wrong-turn probability instead of one run
    #[arg(long)]
    sweep: bool,

    /// Runs per sweep point
    #[arg(long, default_value = "3")]
    runs: usize,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

/// Settings file.  Every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    network:          Option<PathBuf>,
    origin:           Option<u64>,
    sink:             Option<u64>,
    drivers:          Option<usize>,
    erratic_fraction: Option<f64>,
    wrong_turn:       Option<f64>,
    seed:             Option<u64>,
    max_ticks:        Option<u64>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,cq_sim=info")),
        )
        .init();

    let args = Args::parse();
    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };

    // 1. Road network.
    let network_path = args.network.clone().or(file.network.clone());
    let network = match &network_path {
        Some(path) => load_network_csv(path)
            .with_context(|| format!("loading network {}", path.display()))?,
        None => town::build_town()?,
    };
    let (origin_label, sink_label) = match network_path {
        Some(_) => (
            args.origin.or(file.origin).context("--origin is required with --network")?,
            args.sink.or(file.sink).context("--sink is required with --network")?,
        ),
        None => (
            args.origin.or(file.origin).unwrap_or(town::HILLSIDE),
            args.sink.or(file.sink).unwrap_or(town::DOWNTOWN),
        ),
    };

    // 2. Config: flags, then file, then defaults.
    let config = SimConfig {
        driver_count:           args.drivers.or(file.drivers).unwrap_or(DRIVERS),
        erratic_fraction:       args.erratic_fraction.or(file.erratic_fraction).unwrap_or(0.0),
        wrong_turn_probability: args.wrong_turn.or(file.wrong_turn).unwrap_or(0.0),
        origin:                 network.node_for_label(origin_label)?,
        sink:                   network.node_for_label(sink_label)?,
        seed:                   args.seed.or(file.seed).unwrap_or_else(rand::random),
        max_ticks:              Some(args.max_ticks.or(file.max_ticks).unwrap_or(MAX_TICKS)),
    };

    info!(
        nodes            = network.node_count(),
        roads            = network.road_count(),
        origin           = origin_label,
        sink             = sink_label,
        drivers          = config.driver_count,
        erratic_fraction = config.erratic_fraction,
        wrong_turn       = config.wrong_turn_probability,
        seed             = config.seed,
        "starting"
    );

    if args.sweep {
        sweep(&network, config, args.runs)
    } else {
        single(&network, config, args.json)
    }
}

// ── Modes ─────────────────────────────────────────────────────────────────────

fn single(network: &RoadNetwork, config: SimConfig, json: bool) -> Result<()> {
    let mut sim = SimBuilder::new(config, network).build()?;
    println!(
        "Origin path: {} hops, {:.0} m",
        sim.origin_path().hop_count(),
        sim.origin_path().total_length
    );

    let t0 = Instant::now();
    let outcome = match sim.run(&mut NoopObserver) {
        Ok(outcome) => outcome,
        Err(SimError::Aborted { tick, source, partial }) => {
            eprintln!("run aborted during {tick}: {source}");
            eprintln!("{} of {} drivers had arrived", partial.arrived, partial.population);
            return Err(source.into());
        }
        Err(e) => return Err(e.into()),
    };
    let elapsed = t0.elapsed();

    if let RunOutcome::DidNotConverge(r) = &outcome {
        println!("Stopped at {} with {} of {} drivers home", r.ticks, r.arrived, r.population);
    }
    let report = outcome.into_report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Finished in {} ({:.3} s wall)", report.ticks, elapsed.as_secs_f64());
    let (hits, misses) = sim.cache_stats();
    println!("Shortest-path cache: {hits} hits, {misses} misses");
    println!();
    println!("{:<12} {:>8} {:>16}", "Class", "Arrived", "Mean arrival");
    println!("{}", "-".repeat(38));
    for class in DriverClass::ALL {
        let mean = report
            .mean_arrival_tick(class)
            .map_or_else(|| "-".to_string(), |m| format!("{m:.1}"));
        println!("{:<12} {:>8} {:>16}", class.to_string(), report.curve(class).len(), mean);
    }

    let longest = report.iteration_counts.iter().max().copied().unwrap_or(0);
    let shortest = report.iteration_counts.iter().min().copied().unwrap_or(0);
    println!();
    println!("Hops per driver: min {shortest}, max {longest}");
    Ok(())
}

fn sweep(network: &RoadNetwork, base: SimConfig, runs: usize) -> Result<()> {
    let plan = SweepPlan {
        base,
        points: grid(&SWEEP_ERRATIC, &SWEEP_WRONG_TURN),
        runs_per_point: runs,
    };

    let t0 = Instant::now();
    let results = run_sweep(network, &ClassRouting::new(DijkstraRouter), &plan);
    let elapsed = t0.elapsed();

    println!(
        "{:>8} {:>10} {:>6} {:>10} {:>12} {:>12}",
        "erratic", "wrong-turn", "done", "ticks", "disciplined", "erratic"
    );
    println!("{}", "-".repeat(63));
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |m| format!("{m:.1}"));
    for s in summarize(&results) {
        println!(
            "{:>8.2} {:>10.2} {:>6} {:>10} {:>12} {:>12}",
            s.point.erratic_fraction,
            s.point.wrong_turn_probability,
            format!("{}/{}", s.converged, s.runs),
            fmt(s.mean_ticks),
            fmt(s.mean_arrival_tick[0]),
            fmt(s.mean_arrival_tick[1]),
        );
    }
    println!();
    println!("{} runs in {:.3} s", results.len(), elapsed.as_secs_f64());
    Ok(())
}
