//! Single-car race model.
//!
//! - [`lap`]: time of one lap from race state and static parameters
//! - [`state`]: per-trial mutable state and pit-stop rules
//! - [`trial`]: one full race distance to a total time
//! - [`simulator`]: many independent trials to a time distribution
//!
//! No overtaking, traffic or track geometry is modeled.

pub mod lap;
pub mod simulator;
pub mod state;
pub mod trial;

pub use lap::{compute_lap_time, LapBreakdown};
pub use simulator::RaceSimulator;
pub use state::{PitStopReason, RaceState};
pub use trial::{run_trial, trace_trial, LapRecord, TrialTrace};
