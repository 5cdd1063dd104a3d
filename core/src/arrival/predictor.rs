use crate::cycle::evaluate;
use crate::cycle::instant::advance_by_seconds;
use crate::prelude::{ArrivalResult, ClockSource, SignalResult};
use crate::site::SignalSite;
use crate::telemetry::log::LogManager;
use chrono::{DateTime, Utc};

/// Predicts the phase a traveler will meet, given a travel-time estimate.
pub struct ArrivalPredictor<C> {
    clock: C,
    logger: LogManager,
}

impl<C: ClockSource> ArrivalPredictor<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            logger: LogManager::new(),
        }
    }

    /// `now()` plus the travel estimate. Fails on negative or non-finite input.
    pub fn arrival_instant(&self, travel_seconds: f64) -> SignalResult<DateTime<Utc>> {
        advance_by_seconds(self.clock.now(), travel_seconds)
    }

    pub fn predict_arrival(
        &self,
        site: &SignalSite,
        travel_seconds: f64,
    ) -> SignalResult<ArrivalResult> {
        let arrival_instant = self.arrival_instant(travel_seconds)?;
        let result = evaluate(site, arrival_instant)?;

        self.logger.debug(&format!(
            "{}: arrival in {:.0}s at {} -> {}",
            site.id(),
            travel_seconds,
            arrival_instant.to_rfc3339(),
            result.phase
        ));

        Ok(ArrivalResult {
            phase: result.phase,
            arrival_instant,
        })
    }
}
