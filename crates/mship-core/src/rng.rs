//! Deterministic per-process RNG streams.
//!
//! # Determinism strategy
//!
//! Every logical process (passenger source, vehicle, robot run, …) owns an
//! independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (stream_salt * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive salts uniformly across the seed space.  Salts
//! are derived from stable facts (route/stop indices, launch order, package
//! id), not from spawn order alone, so:
//!
//! - Processes never share RNG state, so draw counts in one process cannot
//!   disturb another.
//! - Adding a route or an extra vehicle leaves the streams of existing
//!   processes untouched.
//! - A fixed global seed reproduces every record sequence exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TimeBand;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Floor for uniform draws fed into `ln`, keeping the gap finite.
const MIN_UNIFORM: f64 = 1e-12;

/// Mix a global seed with a stream salt.
#[inline]
pub fn mix_seed(global_seed: u64, salt: u64) -> u64 {
    global_seed ^ salt.wrapping_mul(MIXING_CONSTANT)
}

// ── StreamRng ─────────────────────────────────────────────────────────────────

/// Per-process deterministic RNG.
///
/// Create one per logical process at construction time.  The type is `!Sync`
/// to prevent accidental sharing — replication sweeps give every run its own
/// set of streams.
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Seed deterministically from the run's global seed and a stream salt.
    pub fn new(global_seed: u64, salt: u64) -> Self {
        StreamRng(SmallRng::seed_from_u64(mix_seed(global_seed, salt)))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`WeightedIndex::sample(rng.inner())`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
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

    /// Draw an exponential inter-arrival gap, in minutes, for a process with
    /// `rate` expected arrivals per minute.
    ///
    /// # Panics
    /// Panics in debug mode if `rate` is not strictly positive and finite.
    #[inline]
    pub fn exp_gap(&mut self, rate: f64) -> f64 {
        debug_assert!(rate.is_finite() && rate > 0.0, "exp_gap needs rate > 0, got {rate}");
        let u: f64 = self.0.r#gen::<f64>();
        -u.max(MIN_UNIFORM).ln() / rate
    }

    /// Draw a duration uniformly from a band.  Zero-width bands are exact.
    #[inline]
    pub fn band(&mut self, band: TimeBand) -> f64 {
        if band.hi > band.lo {
            self.0.gen_range(band.lo..band.hi)
        } else {
            band.lo
        }
    }
}
