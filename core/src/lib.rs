//! Cycle clock and arrival predictor for fixed-time traffic signals.
//!
//! A signal runs a fixed YELLOW → RED → GREEN cycle anchored at a reference
//! instant. Everything here is a pure function of that anchor, the phase
//! durations and a query instant; scheduling, routing and rendering live with
//! the caller.

pub mod arrival;
pub mod cycle;
pub mod prelude;
pub mod site;
pub mod telemetry;

pub use arrival::{ArrivalPredictor, FixedClock, SystemClock};
pub use cycle::{evaluate, instant_from_unix_seconds, parse_instant, PhaseDurations, PhaseTable};
pub use prelude::{
    ArrivalResult, ClockSource, Phase, PhaseResult, SignalError, SignalResult,
};
pub use site::{ActiveSiteSelection, Coordinate, SignalSite, SiteId, SiteRegistry};
