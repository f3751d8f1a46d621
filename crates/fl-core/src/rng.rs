//! Deterministic mission-level RNG wrapper.
//!
//! A mission seeded with the same value always samples the same effective
//! link powers, so simulated runs are reproducible end to end.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Mission-level deterministic RNG.
///
/// Create one per mission at build time.  All sampling goes through this
/// wrapper so call sites never touch `rand` traits directly.
pub struct MissionRng(SmallRng);

impl MissionRng {
    pub fn new(seed: u64) -> Self {
        MissionRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// `value` perturbed by a uniform offset in `±spread`, floored at zero.
    ///
    /// Used for per-node effective link power (a node's usable power differs
    /// from the plan's nominal figure; the exact distribution belongs to the
    /// radio model, which is external).
    #[inline]
    pub fn jitter(&mut self, value: f64, spread: f64) -> f64 {
        (value + self.0.gen_range(-spread..spread)).max(0.0)
    }
}
