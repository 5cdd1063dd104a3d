use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use signalcore::{Coordinate, PhaseDurations, PhaseTable, SignalSite, SiteRegistry};
use std::fs;
use std::path::Path;

/// Deployment description: the shared cycle, the shared anchor and the sites.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub phases: PhaseTable,
    pub reference: DateTime<Utc>,
    pub sites: Vec<SiteConfig>,
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiteConfig {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    /// Absolute anchor replacing the shared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<DateTime<Utc>>,
    /// Shift applied on top of whichever anchor is in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_offset_secs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<PhaseTable>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub speed_kmh: f64,
    pub detour_factor: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            speed_kmh: 30.0,
            detour_factor: 1.3,
        }
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            phases: PhaseTable {
                yellow: 3,
                red: 90,
                green: 27,
            },
            reference: DateTime::from_timestamp(1_754_675_324, 0).unwrap_or(DateTime::UNIX_EPOCH),
            sites: vec![
                SiteConfig {
                    id: "modigliana".into(),
                    name: "Verso Modigliana".into(),
                    coordinate: Coordinate::new(44.172_828_570_646_56, 11.812_279_848_983_788),
                    reference: None,
                    reference_offset_secs: None,
                    phases: None,
                },
                SiteConfig {
                    id: "faenza".into(),
                    name: "Verso Faenza".into(),
                    coordinate: Coordinate::new(44.171_031_713_746_146, 11.809_469_937_437_775),
                    reference: None,
                    reference_offset_secs: Some(60),
                    phases: None,
                },
            ],
            routing: RoutingConfig::default(),
        }
    }
}

impl DeploymentConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading deployment config {}", path_ref.display()))?;
        let config: DeploymentConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing deployment config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Validates every site and freezes the set into a registry.
    pub fn to_registry(&self) -> anyhow::Result<SiteRegistry> {
        let mut sites = Vec::with_capacity(self.sites.len());
        for site in &self.sites {
            let table = site.phases.unwrap_or(self.phases);
            let durations = PhaseDurations::try_from(table)
                .with_context(|| format!("phase table for site {}", site.id))?;
            let reference = site_reference(site, self.reference)?;
            sites.push(SignalSite::new(
                site.id.as_str(),
                site.name.clone(),
                site.coordinate,
                reference,
                durations,
            ));
        }
        SiteRegistry::new(sites).context("building site registry")
    }
}

fn site_reference(site: &SiteConfig, shared: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let base = site.reference.unwrap_or(shared);
    let offset = site.reference_offset_secs.unwrap_or(0);
    Duration::try_seconds(offset)
        .and_then(|delta| base.checked_add_signed(delta))
        .with_context(|| format!("reference offset {}s for site {} is out of range", offset, site.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signalcore::SiteId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_deployment_offsets_second_site() {
        let registry = DeploymentConfig::default().to_registry().unwrap();
        let modigliana = registry.get(&SiteId::from("modigliana")).unwrap();
        let faenza = registry.get(&SiteId::from("faenza")).unwrap();
        assert_eq!(
            faenza.reference() - modigliana.reference(),
            Duration::seconds(60)
        );
        assert_eq!(modigliana.durations().cycle_length().unwrap(), 120);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"phases: { YELLOW: 4, RED: 40, GREEN: 30 }\n\
              reference: 2025-08-08T17:48:44Z\n\
              sites:\n\
              \x20 - id: north\n\
              \x20   name: Northbound\n\
              \x20   coordinate: { lat: 44.0, lng: 11.0 }\n\
              \x20 - id: south\n\
              \x20   name: Southbound\n\
              \x20   coordinate: { lat: 44.1, lng: 11.1 }\n\
              \x20   phases: { yellow: 3, red: 50, green: 20 }\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = DeploymentConfig::load(&path).unwrap();
        assert_eq!(cfg.routing.speed_kmh, 30.0);

        let registry = cfg.to_registry().unwrap();
        assert_eq!(registry.len(), 2);
        let south = registry.get(&SiteId::from("south")).unwrap();
        assert_eq!(south.durations().cycle_length().unwrap(), 73);
    }

    #[test]
    fn non_positive_phase_is_reported_with_site() {
        let mut cfg = DeploymentConfig::default();
        cfg.sites[1].phases = Some(PhaseTable {
            yellow: 3,
            red: 0,
            green: 27,
        });
        let err = cfg.to_registry().unwrap_err();
        assert!(format!("{:#}", err).contains("faenza"));
    }

    #[test]
    fn duplicate_site_ids_fail_registry() {
        let mut cfg = DeploymentConfig::default();
        cfg.sites[1].id = "modigliana".into();
        assert!(cfg.to_registry().is_err());
    }
}
