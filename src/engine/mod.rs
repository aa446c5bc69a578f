//! Simulation infrastructure shared by every trial.
//!
//! - Deterministic RNG (PCG with one stream per trial)
//! - Jidoka guard for stop-on-error
//! - Work-stealing executor for parallel batches

pub mod jidoka;
pub mod pool;
pub mod rng;

pub use jidoka::{CheckPoint, JidokaGuard};
pub use pool::{PoolOutcome, TrialPool};
pub use rng::SimRng;
