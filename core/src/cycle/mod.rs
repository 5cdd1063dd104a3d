pub mod clock;
pub mod durations;
pub mod instant;

pub use clock::evaluate;
pub use durations::{PhaseDurations, PhaseTable};
pub use instant::{instant_from_unix_seconds, parse_instant};
