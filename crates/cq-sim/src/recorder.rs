//! Per-class arrival curves.

use std::collections::BTreeMap;

use cq_core::{DriverClass, Tick};
use cq_driver::Driver;

/// `arrived count → tick at which that count was first observed`.
///
/// Keys run `1..=n` without gaps; values are non-decreasing.
pub type ArrivalCurve = BTreeMap<u32, Tick>;

/// Watches the sink queue once per tick and builds one curve per class.
#[derive(Debug, Default, Clone)]
pub struct ArrivalRecorder {
    curves: [ArrivalCurve; 2],
    last:   [u32; 2],
}

impl ArrivalRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the sink's drivers by class and record any growth at `tick`.
    ///
    /// If a class grew by several drivers since the last call, each of the
    /// intermediate counts is recorded with the same `tick`.  Returns the
    /// number of new arrivals per class.
    pub fn observe<'a, I>(&mut self, tick: Tick, sink: I) -> [u32; 2]
    where
        I: IntoIterator<Item = &'a Driver>,
    {
        let mut now = [0u32; 2];
        for d in sink {
            now[d.class.index()] += 1;
        }

        let mut fresh = [0u32; 2];
        for class in DriverClass::ALL {
            let i = class.index();
            if now[i] > self.last[i] {
                for count in self.last[i] + 1..=now[i] {
                    self.curves[i].insert(count, tick);
                }
                fresh[i] = now[i] - self.last[i];
                self.last[i] = now[i];
            }
        }
        fresh
    }

    pub fn curve(&self, class: DriverClass) -> &ArrivalCurve {
        &self.curves[class.index()]
    }

    /// Drivers of `class` seen at the sink so far.
    pub fn arrived(&self, class: DriverClass) -> u32 {
        self.last[class.index()]
    }

    /// Mean arrival tick of `class`, or `None` if none has arrived.
    pub fn mean_arrival_tick(&self, class: DriverClass) -> Option<f64> {
        mean_tick(self.curve(class))
    }

    /// Final iteration counts, in the order the drivers reached the sink.
    pub fn iteration_counts<'a, I>(sink: I) -> Vec<u32>
    where
        I: IntoIterator<Item = &'a Driver>,
    {
        sink.into_iter().map(|d| d.iterations).collect()
    }

    /// `[disciplined, erratic]` curves.
    pub fn curves(&self) -> &[ArrivalCurve; 2] {
        &self.curves
    }
}

pub(crate) fn mean_tick(curve: &ArrivalCurve) -> Option<f64> {
    if curve.is_empty() {
        return None;
    }
    let sum: u64 = curve.values().map(|t| t.0).sum();
    Some(sum as f64 / curve.len() as f64)
}
