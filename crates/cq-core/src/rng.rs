//! The per-run random stream.
//!
//! A run draws every random decision (driver classes, wrong-turn coin flips,
//! random neighbours) from one `SimRng` in a fixed order, so its result is a
//! function of `(network, config, seed)` alone.
//!
//! Sweeps need one stream per run.  [`SimRng::child`] derives it as
//! `parent draw XOR offset * φ64`, where φ64 is the 64-bit fractional part
//! of the golden ratio; consecutive offsets land far apart in seed space.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded random stream owned by one run.
///
/// Not `Clone`: a copy would replay the same draws in a second run.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Independent stream for run number `offset`.  Advances `self` by one
    /// draw.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let parent: u64 = self.0.r#gen();
        SimRng::new(parent ^ offset.wrapping_mul(GOLDEN_GAMMA))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// `true` with probability `p`.
    ///
    /// Always consumes exactly one draw, even for `p` of 0 or 1, so the
    /// stream position depends only on how many coins were flipped.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.r#gen::<f64>() < p
    }

    /// Uniform pick from `slice`; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
