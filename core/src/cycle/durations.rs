use crate::prelude::{Phase, PhaseResult, SignalError, SignalResult};
use serde::{Deserialize, Serialize};

/// Phase-duration table as it appears in configuration files.
///
/// Values are signed so that a zero or negative entry surfaces as an
/// `InvalidConfiguration` instead of a parse failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseTable {
    #[serde(rename = "YELLOW", alias = "yellow")]
    pub yellow: i64,
    #[serde(rename = "RED", alias = "red")]
    pub red: i64,
    #[serde(rename = "GREEN", alias = "green")]
    pub green: i64,
}

/// Validated durations of one full cycle, stored in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PhaseTable", into = "PhaseTable")]
pub struct PhaseDurations {
    entries: Vec<(Phase, u32)>,
}

impl PhaseDurations {
    pub fn new(yellow: u32, red: u32, green: u32) -> SignalResult<Self> {
        Self::from_entries(&[
            (Phase::Yellow, i64::from(yellow)),
            (Phase::Red, i64::from(red)),
            (Phase::Green, i64::from(green)),
        ])
    }

    /// Builds a table from `(phase, seconds)` pairs. The pairs must cover the
    /// cycle exactly once each, in YELLOW, RED, GREEN order.
    pub fn from_entries(entries: &[(Phase, i64)]) -> SignalResult<Self> {
        if entries.is_empty() {
            return Err(SignalError::InvalidConfiguration(
                "phase-duration table is empty".into(),
            ));
        }

        let phases: Vec<Phase> = entries.iter().map(|(phase, _)| *phase).collect();
        if phases != Phase::CYCLE_ORDER {
            return Err(SignalError::InvalidConfiguration(format!(
                "phases must be listed as YELLOW, RED, GREEN (got {:?})",
                phases
            )));
        }

        let mut validated = Vec::with_capacity(entries.len());
        for &(phase, seconds) in entries {
            if seconds <= 0 {
                return Err(SignalError::InvalidConfiguration(format!(
                    "{} duration must be positive, got {}",
                    phase, seconds
                )));
            }
            let seconds = u32::try_from(seconds).map_err(|_| {
                SignalError::InvalidConfiguration(format!(
                    "{} duration {} is too large",
                    phase, seconds
                ))
            })?;
            validated.push((phase, seconds));
        }

        Ok(Self { entries: validated })
    }

    pub fn entries(&self) -> &[(Phase, u32)] {
        &self.entries
    }

    pub fn duration_of(&self, phase: Phase) -> Option<u32> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == phase)
            .map(|(_, seconds)| *seconds)
    }

    /// Sum of all phase durations, in seconds.
    pub fn cycle_length(&self) -> SignalResult<u64> {
        let total: u64 = self
            .entries
            .iter()
            .map(|(_, seconds)| u64::from(*seconds))
            .sum();
        if total == 0 {
            return Err(SignalError::InvalidConfiguration(
                "cycle length must be positive".into(),
            ));
        }
        Ok(total)
    }

    /// Resolves a whole-second offset into the cycle to the active phase.
    pub fn locate(&self, position: u64) -> SignalResult<PhaseResult> {
        let cycle_length = self.cycle_length()?;
        let position = position % cycle_length;

        let mut threshold = 0u64;
        for &(phase, seconds) in &self.entries {
            threshold += u64::from(seconds);
            if position < threshold {
                return Ok(PhaseResult::new(phase, threshold - position));
            }
        }

        Err(SignalError::InvalidConfiguration(format!(
            "position {} falls outside a {} s cycle",
            position, cycle_length
        )))
    }
}

impl TryFrom<PhaseTable> for PhaseDurations {
    type Error = SignalError;

    fn try_from(table: PhaseTable) -> SignalResult<Self> {
        Self::from_entries(&[
            (Phase::Yellow, table.yellow),
            (Phase::Red, table.red),
            (Phase::Green, table.green),
        ])
    }
}

impl From<PhaseDurations> for PhaseTable {
    fn from(durations: PhaseDurations) -> Self {
        let seconds = |phase| i64::from(durations.duration_of(phase).unwrap_or(0));
        PhaseTable {
            yellow: seconds(Phase::Yellow),
            red: seconds(Phase::Red),
            green: seconds(Phase::Green),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_length_sums_every_phase() {
        let durations = PhaseDurations::new(3, 90, 27).unwrap();
        assert_eq!(durations.cycle_length().unwrap(), 120);
        assert_eq!(durations.duration_of(Phase::Red), Some(90));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = PhaseDurations::new(3, 0, 27).unwrap_err();
        assert!(matches!(err, SignalError::InvalidConfiguration(_)));
    }

    #[test]
    fn negative_table_entry_is_rejected() {
        let table = PhaseTable {
            yellow: 3,
            red: 90,
            green: -1,
        };
        let err = PhaseDurations::try_from(table).unwrap_err();
        assert!(err.to_string().contains("GREEN"));
    }

    #[test]
    fn empty_and_misordered_entries_are_rejected() {
        assert!(matches!(
            PhaseDurations::from_entries(&[]),
            Err(SignalError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            PhaseDurations::from_entries(&[
                (Phase::Red, 90),
                (Phase::Yellow, 3),
                (Phase::Green, 27)
            ]),
            Err(SignalError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn locate_reports_time_to_phase_end() {
        let durations = PhaseDurations::new(3, 90, 27).unwrap();
        assert_eq!(
            durations.locate(0).unwrap(),
            PhaseResult::new(Phase::Yellow, 3)
        );
        assert_eq!(
            durations.locate(92).unwrap(),
            PhaseResult::new(Phase::Red, 1)
        );
        assert_eq!(
            durations.locate(119).unwrap(),
            PhaseResult::new(Phase::Green, 1)
        );
    }

    #[test]
    fn table_deserializes_from_upper_or_lower_case_keys() {
        let upper: PhaseDurations =
            serde_json::from_str(r#"{"YELLOW":3,"RED":90,"GREEN":27}"#).unwrap();
        let lower: PhaseDurations =
            serde_json::from_str(r#"{"yellow":3,"red":90,"green":27}"#).unwrap();
        assert_eq!(upper, lower);

        let invalid = serde_json::from_str::<PhaseDurations>(r#"{"YELLOW":3,"RED":0,"GREEN":27}"#);
        assert!(invalid.is_err());
    }
}
