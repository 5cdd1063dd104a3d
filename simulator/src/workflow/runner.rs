use crate::display::{DisplayModel, RouteView};
use crate::routing::RouteEstimate;
use anyhow::Context;
use signalcore::telemetry::{EvaluationRecorder, LogManager};
use signalcore::{
    evaluate, ActiveSiteSelection, ArrivalPredictor, ClockSource, SignalError, SignalSite, SiteId,
    SiteRegistry,
};

/// Owns the configured sites and the caller-side selection, and turns clock
/// readings into display models.
pub struct Runner {
    registry: SiteRegistry,
    selection: ActiveSiteSelection,
    recorder: EvaluationRecorder,
    logger: LogManager,
}

impl Runner {
    pub fn new(registry: SiteRegistry) -> Self {
        let selection = registry.default_selection();
        Self {
            registry,
            selection,
            recorder: EvaluationRecorder::new(),
            logger: LogManager::with_target("signalsim"),
        }
    }

    pub fn select(&mut self, id: &SiteId) -> anyhow::Result<()> {
        self.selection
            .select(&self.registry, id)
            .with_context(|| format!("selecting site {}", id))?;
        self.logger.record(&format!("active site -> {}", id));
        Ok(())
    }

    pub fn active_site(&self) -> anyhow::Result<&SignalSite> {
        self.selection
            .resolve(&self.registry)
            .context("resolving active site")
    }

    /// The active site alone, or every configured site in configuration order.
    pub fn sites(&self, all: bool) -> anyhow::Result<Vec<&SignalSite>> {
        if all {
            Ok(self.registry.iter().collect())
        } else {
            Ok(vec![self.active_site()?])
        }
    }

    pub fn report(
        &self,
        site: &SignalSite,
        clock: &dyn ClockSource,
        route: Option<&RouteEstimate>,
    ) -> anyhow::Result<DisplayModel> {
        let now = clock.now();
        let current = self
            .recorder
            .observe(evaluate(site, now))
            .map_err(|err| self.warn_failure(site, err))
            .with_context(|| format!("evaluating site {}", site.id()))?;

        let route = match route {
            Some(estimate) => {
                let predictor = ArrivalPredictor::new(clock);
                let arrival = self
                    .recorder
                    .observe(predictor.predict_arrival(site, estimate.travel_seconds))
                    .map_err(|err| self.warn_failure(site, err))
                    .with_context(|| format!("predicting arrival at site {}", site.id()))?;
                Some(RouteView {
                    distance_m: estimate.distance_m,
                    travel_seconds: estimate.travel_seconds,
                    arrival_instant: arrival.arrival_instant,
                    arrival_phase: arrival.phase,
                })
            }
            None => None,
        };

        Ok(DisplayModel {
            site_id: site.id().to_string(),
            site_name: site.name().to_string(),
            evaluated_at: now,
            phase: current.phase,
            remaining_seconds: current.remaining_seconds,
            route,
        })
    }

    fn warn_failure(&self, site: &SignalSite, err: SignalError) -> SignalError {
        self.logger.warn(&format!("{}: {}", site.id(), err));
        err
    }

    /// `(evaluations, errors)` recorded by this runner.
    pub fn totals(&self) -> (usize, usize) {
        self.recorder.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::DeploymentConfig;
    use chrono::Duration;
    use signalcore::{FixedClock, Phase};

    fn runner() -> Runner {
        Runner::new(DeploymentConfig::default().to_registry().unwrap())
    }

    #[test]
    fn runner_reports_active_site_with_arrival() {
        let runner = runner();
        let site = runner.active_site().unwrap();
        let clock = FixedClock::new(site.reference());
        let route = RouteEstimate::from_travel_seconds(93.0);

        let model = runner.report(site, &clock, Some(&route)).unwrap();
        assert_eq!(model.site_id, "modigliana");
        assert_eq!(model.phase, Phase::Yellow);
        assert_eq!(model.remaining_seconds, 3);
        assert_eq!(model.route.unwrap().arrival_phase, Phase::Green);
        assert_eq!(runner.totals(), (2, 0));
    }

    #[test]
    fn sites_are_evaluated_against_their_own_reference() {
        let mut runner = runner();
        let modigliana_ref = runner.active_site().unwrap().reference();
        let clock = FixedClock::new(modigliana_ref + Duration::seconds(30));

        runner.select(&SiteId::from("faenza")).unwrap();
        let faenza = runner.active_site().unwrap();
        let model = runner.report(faenza, &clock, None).unwrap();
        assert_eq!(model.phase, Phase::Red);
        assert_eq!(model.remaining_seconds, 30);
        assert_eq!(runner.sites(true).unwrap().len(), 2);
    }

    #[test]
    fn invalid_travel_is_counted_as_error() {
        let runner = runner();
        let site = runner.active_site().unwrap();
        let clock = FixedClock::new(site.reference());
        let route = RouteEstimate::from_travel_seconds(-5.0);

        assert!(runner.report(site, &clock, Some(&route)).is_err());
        assert_eq!(runner.totals(), (2, 1));
    }

    #[test]
    fn selecting_unknown_site_fails() {
        let mut runner = runner();
        assert!(runner.select(&SiteId::from("ravenna")).is_err());
        assert_eq!(runner.active_site().unwrap().id().as_str(), "modigliana");
    }
}
