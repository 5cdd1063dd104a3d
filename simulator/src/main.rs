use anyhow::Context;
use clap::Parser;
use display::Console;
use routing::{RouteEstimate, RouteEstimator, StraightLineRouter};
use signalcore::{parse_instant, ClockSource, Coordinate, FixedClock, SignalSite, SiteId, SystemClock};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::DeploymentConfig;
use workflow::runner::Runner;

mod display;
mod routing;
mod workflow;

const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(author, version, about = "Reports traffic-signal phases and arrival predictions")]
struct Args {
    /// Load a deployment config from YAML instead of the built-in one
    #[arg(long)]
    config: Option<PathBuf>,
    /// Site to display (defaults to the first configured site)
    #[arg(long)]
    site: Option<String>,
    /// Report every configured site
    #[arg(long, default_value_t = false)]
    all: bool,
    /// Evaluate at this RFC 3339 instant instead of now
    #[arg(long, conflicts_with = "watch")]
    at: Option<String>,
    /// Travel time to the signal, in seconds
    #[arg(long, conflicts_with_all = ["from_lat", "from_lng"])]
    travel_seconds: Option<f64>,
    /// Traveler latitude; travel time is estimated along a straight line
    #[arg(long, requires = "from_lng", allow_hyphen_values = true)]
    from_lat: Option<f64>,
    /// Traveler longitude
    #[arg(long, requires = "from_lat", allow_hyphen_values = true)]
    from_lng: Option<f64>,
    /// Average speed for straight-line estimates (overrides the config)
    #[arg(long)]
    speed_kmh: Option<f64>,
    /// Emit JSON lines instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Keep refreshing every second until Ctrl+C
    #[arg(long, default_value_t = false)]
    watch: bool,
    /// Append every printed line to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn origin(&self) -> Option<Coordinate> {
        match (self.from_lat, self.from_lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

/// Where the travel estimate for each refresh comes from.
enum TravelSource {
    None,
    Fixed(f64),
    Routed {
        origin: Coordinate,
        router: StraightLineRouter,
    },
}

impl TravelSource {
    fn estimate(&self, site: &SignalSite) -> anyhow::Result<Option<RouteEstimate>> {
        match self {
            TravelSource::None => Ok(None),
            TravelSource::Fixed(seconds) => Ok(Some(RouteEstimate::from_travel_seconds(*seconds))),
            TravelSource::Routed { origin, router } => router
                .estimate(*origin, site.coordinate())
                .map(Some)
                .with_context(|| format!("estimating route to site {}", site.id())),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        DeploymentConfig::load(path)?
    } else {
        DeploymentConfig::default()
    };

    let mut runner = Runner::new(config.to_registry()?);
    if let Some(id) = &args.site {
        runner.select(&SiteId::from(id.as_str()))?;
    }

    let travel = match (args.travel_seconds, args.origin()) {
        (Some(seconds), _) => TravelSource::Fixed(seconds),
        (None, Some(origin)) => TravelSource::Routed {
            origin,
            router: StraightLineRouter::new(
                args.speed_kmh.unwrap_or(config.routing.speed_kmh),
                config.routing.detour_factor,
            )
            .context("configuring straight-line router")?,
        },
        (None, None) => TravelSource::None,
    };

    let console = Console::new(args.json, args.report.clone());

    if args.watch {
        return watch(&runner, &travel, &console, args.all);
    }

    let clock: Box<dyn ClockSource> = match &args.at {
        Some(text) => Box::new(FixedClock::new(
            parse_instant(text).context("parsing --at instant")?,
        )),
        None => Box::new(SystemClock),
    };

    let sites = runner.sites(args.all)?;
    let routes = estimate_routes(&travel, &sites)?;
    let mut models = Vec::with_capacity(sites.len());
    for (site, route) in sites.iter().zip(&routes) {
        models.push(runner.report(site, clock.as_ref(), route.as_ref())?);
    }
    console.publish(&models)?;
    Ok(())
}

/// One estimate per site. The straight-line router is a pure function of a
/// fixed origin, so the watch loop reuses these instead of re-estimating.
fn estimate_routes(
    travel: &TravelSource,
    sites: &[&SignalSite],
) -> anyhow::Result<Vec<Option<RouteEstimate>>> {
    sites.iter().map(|site| travel.estimate(site)).collect()
}

fn watch(runner: &Runner, travel: &TravelSource, console: &Console, all: bool) -> anyhow::Result<()> {
    console.publish_status("Watching signal (Ctrl+C to stop)...");
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the refresh loop")?;

    runtime.block_on(async {
        let sites = runner.sites(all)?;
        let routes = estimate_routes(travel, &sites)?;

        let mut refresh = tokio::time::interval(REFRESH_INTERVAL);
        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = refresh.tick() => {
                    let mut models = Vec::with_capacity(sites.len());
                    for (site, route) in sites.iter().zip(&routes) {
                        models.push(runner.report(site, &SystemClock, route.as_ref())?);
                    }
                    console.publish(&models)?;
                }
                result = &mut ctrl_c => {
                    result.context("awaiting Ctrl+C to exit")?;
                    break;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    })?;

    let (evaluations, errors) = runner.totals();
    console.publish_status(&format!(
        "stopped after {} evaluations ({} errors)",
        evaluations, errors
    ));
    Ok(())
}
