use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable state of a signal head.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Red,
    Yellow,
    Green,
}

impl Phase {
    /// Traversal order of one cycle. The reference instant marks the start of
    /// the first entry.
    pub const CYCLE_ORDER: [Phase; 3] = [Phase::Yellow, Phase::Red, Phase::Green];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Red => "RED",
            Phase::Yellow => "YELLOW",
            Phase::Green => "GREEN",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the cycle clock for one query instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseResult {
    pub phase: Phase,
    pub remaining_seconds: u64,
}

impl PhaseResult {
    pub fn new(phase: Phase, remaining_seconds: u64) -> Self {
        Self {
            phase,
            remaining_seconds,
        }
    }
}

/// Phase expected when a traveler reaches the signal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArrivalResult {
    pub phase: Phase,
    pub arrival_instant: DateTime<Utc>,
}

/// Common error type for clock evaluation and prediction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type SignalResult<T> = Result<T, SignalError>;

/// Source of the current instant, injected wherever "now" is needed.
pub trait ClockSource {
    fn now(&self) -> DateTime<Utc>;
}
