//! Deterministic per-host and model-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each host gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (host_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive host IDs uniformly across the seed space.
//! This means:
//!
//! - Movement decisions never share RNG state, so they can be computed in
//!   any order (or in parallel) and still reproduce exactly.
//! - Adding hosts at the end of the population does not disturb the seeds
//!   of existing hosts.
//!
//! Transmission and progression draws are made sequentially, in id order,
//! from the single model-level [`SimRng`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::HostId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── HostRng ───────────────────────────────────────────────────────────────────

/// Per-host deterministic RNG.
///
/// Stored in a parallel `Vec<HostRng>` alongside the host store, so the
/// movement phase can hold `&mut` RNGs and `&` hosts at the same time.
pub struct HostRng(SmallRng);

impl HostRng {
    /// Seed deterministically from the run's global seed and a host ID.
    pub fn new(global_seed: u64, host: HostId) -> Self {
        let seed = global_seed ^ (host.0 as u64).wrapping_mul(MIXING_CONSTANT);
        HostRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for `Rate::roll`, `TimeDistribution::sample`
    /// and other `rand`-generic APIs.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Model-level RNG for sequential passes (transmission, progression,
/// scenario construction).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw from `range`, used when laying out places and hosts.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
