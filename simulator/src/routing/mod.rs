use serde::{Deserialize, Serialize};
use signalcore::Coordinate;

pub mod straight_line;

pub use straight_line::StraightLineRouter;

/// Travel estimate handed to the arrival predictor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RouteEstimate {
    /// Unknown when the caller supplied a bare travel time.
    pub distance_m: Option<f64>,
    pub travel_seconds: f64,
}

impl RouteEstimate {
    pub fn from_travel_seconds(travel_seconds: f64) -> Self {
        Self {
            distance_m: None,
            travel_seconds,
        }
    }
}

/// Routing collaborator that turns an origin/destination pair into a travel time.
pub trait RouteEstimator {
    fn estimate(&self, origin: Coordinate, destination: Coordinate) -> anyhow::Result<RouteEstimate>;
}
