use crate::prelude::{SignalError, SignalResult};
use crate::site::signal::{SignalSite, SiteId};
use std::collections::HashSet;

/// Fixed set of signals known to a deployment.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: Vec<SignalSite>,
}

impl SiteRegistry {
    /// Builds the registry, rejecting an empty set or a repeated identifier.
    pub fn new(sites: Vec<SignalSite>) -> SignalResult<Self> {
        if sites.is_empty() {
            return Err(SignalError::InvalidConfiguration(
                "at least one signal site must be configured".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(sites.len());
        for site in &sites {
            if !seen.insert(site.id()) {
                return Err(SignalError::InvalidConfiguration(format!(
                    "duplicate site id {}",
                    site.id()
                )));
            }
        }

        Ok(Self { sites })
    }

    pub fn get(&self, id: &SiteId) -> Option<&SignalSite> {
        self.sites.iter().find(|site| site.id() == id)
    }

    pub fn contains(&self, id: &SiteId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalSite> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Selection pointing at the first configured site.
    pub fn default_selection(&self) -> ActiveSiteSelection {
        ActiveSiteSelection {
            active: self.sites[0].id().clone(),
        }
    }
}

/// Which site the caller is currently displaying.
///
/// Owned by the caller and passed in explicitly; the clock never consults it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSiteSelection {
    active: SiteId,
}

impl ActiveSiteSelection {
    pub fn new(registry: &SiteRegistry, id: &SiteId) -> SignalResult<Self> {
        let mut selection = registry.default_selection();
        selection.select(registry, id)?;
        Ok(selection)
    }

    pub fn select(&mut self, registry: &SiteRegistry, id: &SiteId) -> SignalResult<()> {
        if !registry.contains(id) {
            return Err(SignalError::InvalidInput(format!("unknown site id {}", id)));
        }
        self.active = id.clone();
        Ok(())
    }

    pub fn active_id(&self) -> &SiteId {
        &self.active
    }

    pub fn resolve<'a>(&self, registry: &'a SiteRegistry) -> SignalResult<&'a SignalSite> {
        registry.get(&self.active).ok_or_else(|| {
            SignalError::InvalidInput(format!("selected site {} is not registered", self.active))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{parse_instant, PhaseDurations};
    use crate::site::signal::Coordinate;

    fn site(id: &str) -> SignalSite {
        SignalSite::new(
            id,
            format!("Signal {}", id),
            Coordinate::new(44.17, 11.81),
            parse_instant("2025-08-08T17:48:44Z").unwrap(),
            PhaseDurations::new(3, 90, 27).unwrap(),
        )
    }

    #[test]
    fn registry_rejects_duplicates_and_empty_sets() {
        assert!(matches!(
            SiteRegistry::new(Vec::new()),
            Err(SignalError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SiteRegistry::new(vec![site("a"), site("a")]),
            Err(SignalError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn selection_defaults_to_first_site_and_switches_explicitly() {
        let registry = SiteRegistry::new(vec![site("modigliana"), site("faenza")]).unwrap();
        let mut selection = registry.default_selection();
        assert_eq!(selection.active_id().as_str(), "modigliana");

        selection.select(&registry, &SiteId::from("faenza")).unwrap();
        assert_eq!(selection.resolve(&registry).unwrap().name(), "Signal faenza");
    }

    #[test]
    fn unknown_selection_is_invalid_input_and_keeps_previous() {
        let registry = SiteRegistry::new(vec![site("modigliana")]).unwrap();
        let mut selection = registry.default_selection();
        let err = selection
            .select(&registry, &SiteId::from("ravenna"))
            .unwrap_err();
        assert!(matches!(err, SignalError::InvalidInput(_)));
        assert_eq!(selection.active_id().as_str(), "modigliana");
    }
}
