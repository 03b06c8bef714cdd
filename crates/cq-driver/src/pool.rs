//! Seeded driver population.
//!
//! # Usage
//!
//! ```rust
//! use cq_core::SimRng;
//! use cq_driver::DriverPool;
//!
//! let mut rng = SimRng::new(42);
//! let pool = DriverPool::generate(100, 0.25, &mut rng).unwrap();
//! assert_eq!(pool.len(), 100);
//! ```

use cq_core::{CoreError, CoreResult, DriverClass, DriverId, SimRng, check_probability};

use crate::Driver;

/// The full driver population of one run, in id order.
#[derive(Debug, Default)]
pub struct DriverPool {
    drivers: Vec<Driver>,
}

impl DriverPool {
    /// Generate `count` drivers with ids `0..count`.
    ///
    /// Each driver is erratic with independent probability
    /// `erratic_fraction`.  Exactly `count` coin flips are drawn from `rng`,
    /// so the population is a pure function of the seed.
    ///
    /// Fails with `InvalidParameter` if `erratic_fraction` is outside
    /// `[0, 1]`, or if `count` drivers would not fit in the id space.
    pub fn generate(count: usize, erratic_fraction: f64, rng: &mut SimRng) -> CoreResult<Self> {
        let p = check_probability("erratic_fraction", erratic_fraction)?;
        if count > 0 && DriverId::from_index(count - 1).is_none() {
            return Err(CoreError::InvalidParameter {
                name:   "driver_count",
                value:  count.to_string(),
                reason: "more drivers than there are driver ids",
            });
        }
        let drivers = (0..=u32::MAX)
            .take(count)
            .map(|i| {
                let class = if rng.gen_bool(p) {
                    DriverClass::Erratic
                } else {
                    DriverClass::Disciplined
                };
                Driver::new(DriverId(i), class)
            })
            .collect();
        Ok(Self { drivers })
    }

    /// Build a pool with an explicit class per driver (ids follow slice
    /// order).  Used for scripted scenarios and tests.
    pub fn from_classes(classes: &[DriverClass]) -> Self {
        let drivers = classes
            .iter()
            .enumerate()
            .map(|(i, &class)| Driver::new(DriverId(i as u32), class))
            .collect();
        Self { drivers }
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// Iterator over all `DriverId`s in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DriverId> + '_ {
        self.drivers.iter().map(|d| d.id)
    }

    /// `[disciplined, erratic]` head counts, indexed by `DriverClass::index`.
    pub fn class_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for d in &self.drivers {
            counts[d.class.index()] += 1;
        }
        counts
    }

    /// Release the drivers for placement in the origin queue.
    pub fn into_drivers(self) -> Vec<Driver> {
        self.drivers
    }
}
