//! What a run hands back.

use cq_core::{DriverClass, Tick};

use crate::recorder::{ArrivalCurve, mean_tick};

/// Lifecycle of a `Sim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimState {
    Running,
    Terminated,
}

/// Result data of one run (complete or partial).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Last completed tick.
    pub ticks: Tick,

    /// Iteration count of every driver at the sink, in arrival order.
    pub iteration_counts: Vec<u32>,

    /// `[disciplined, erratic]`, indexed by `DriverClass::index`.
    pub arrival_curves: [ArrivalCurve; 2],

    /// Drivers at the sink.
    pub arrived: usize,

    pub population: usize,
}

impl RunReport {
    pub fn curve(&self, class: DriverClass) -> &ArrivalCurve {
        &self.arrival_curves[class.index()]
    }

    pub fn mean_arrival_tick(&self, class: DriverClass) -> Option<f64> {
        mean_tick(self.curve(class))
    }

    pub fn all_arrived(&self) -> bool {
        self.arrived == self.population
    }
}

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every driver reached the sink.
    Terminated(RunReport),
    /// `max_ticks` elapsed first.
    DidNotConverge(RunReport),
}

impl RunOutcome {
    pub fn report(&self) -> &RunReport {
        match self {
            RunOutcome::Terminated(r) | RunOutcome::DidNotConverge(r) => r,
        }
    }

    pub fn into_report(self) -> RunReport {
        match self {
            RunOutcome::Terminated(r) | RunOutcome::DidNotConverge(r) => r,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, RunOutcome::Terminated(_))
    }
}
