pub mod clock_source;
pub mod predictor;

pub use clock_source::{FixedClock, SystemClock};
pub use predictor::ArrivalPredictor;
