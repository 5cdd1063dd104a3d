use crate::cycle::PhaseDurations;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Stable identifier of a configured signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A signal with its own cycle anchor. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalSite {
    id: SiteId,
    name: String,
    coordinate: Coordinate,
    /// Start of a YELLOW phase in some cycle of this signal.
    reference: DateTime<Utc>,
    durations: PhaseDurations,
}

impl SignalSite {
    pub fn new(
        id: impl Into<SiteId>,
        name: impl Into<String>,
        coordinate: Coordinate,
        reference: DateTime<Utc>,
        durations: PhaseDurations,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            reference,
            durations,
        }
    }

    pub fn id(&self) -> &SiteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }
}
