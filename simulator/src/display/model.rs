use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signalcore::Phase;

/// Everything the presentation layer needs to draw one signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayModel {
    pub site_id: String,
    pub site_name: String,
    pub evaluated_at: DateTime<Utc>,
    pub phase: Phase,
    pub remaining_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    pub travel_seconds: f64,
    pub arrival_instant: DateTime<Utc>,
    pub arrival_phase: Phase,
}
