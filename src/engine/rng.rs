//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) with one derived seed per stream
//! for reproducible parallel execution.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, the draws of trial `i` are bitwise-identical
//! across:
//! - Different runs
//! - Different platforms
//! - Different thread counts (each trial owns stream `i`)

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Golden-ratio increment separating derived stream seeds.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic, reproducible random number generator.
///
/// Every trial gets its own `SimRng`; the generator is never shared between
/// threads.
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Stream index derived from the master seed.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG on stream 0 of the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create the RNG for one stream of a master seed.
    ///
    /// Stream 0 is identical to [`SimRng::new`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use racesim::engine::rng::SimRng;
    ///
    /// let mut a = SimRng::for_stream(42, 7);
    /// let mut b = SimRng::for_stream(42, 7);
    /// assert_eq!(a.gen_f64(), b.gen_f64());
    /// ```
    #[must_use]
    pub fn for_stream(master_seed: u64, stream: u64) -> Self {
        let seed = master_seed.wrapping_add(stream.wrapping_mul(STREAM_STRIDE));
        Self {
            master_seed,
            stream,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Bernoulli trial: `true` when a uniform draw falls below `p`.
    ///
    /// Always consumes exactly one draw, including for `p` of 0 or 1.
    pub fn gen_bernoulli(&mut self, p: f64) -> bool {
        self.gen_f64() < p
    }

    /// Generate a standard normal sample using Box-Muller transform.
    pub fn gen_standard_normal(&mut self) -> f64 {
        let u1 = self.gen_f64();
        let u2 = self.gen_f64();

        // Avoid log(0)
        let u1 = if u1 < f64::EPSILON { f64::EPSILON } else { u1 };

        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Generate a normal sample with given mean and std.
    pub fn gen_normal(&mut self, mean: f64, std: f64) -> f64 {
        mean + std * self.gen_standard_normal()
    }
}
