use crate::routing::{RouteEstimate, RouteEstimator};
use anyhow::ensure;
use signalcore::Coordinate;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in metres.
pub fn haversine_m(from: Coordinate, to: Coordinate) -> f64 {
    let (lat1, lat2) = (from.lat.to_radians(), to.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// Offline stand-in for a routing provider: straight-line distance stretched by
/// a detour factor, driven at a constant average speed.
#[derive(Debug, Clone)]
pub struct StraightLineRouter {
    speed_kmh: f64,
    detour_factor: f64,
}

impl StraightLineRouter {
    pub fn new(speed_kmh: f64, detour_factor: f64) -> anyhow::Result<Self> {
        ensure!(
            speed_kmh.is_finite() && speed_kmh > 0.0,
            "average speed must be positive, got {}",
            speed_kmh
        );
        ensure!(
            detour_factor.is_finite() && detour_factor >= 1.0,
            "detour factor must be at least 1.0, got {}",
            detour_factor
        );
        Ok(Self {
            speed_kmh,
            detour_factor,
        })
    }
}

impl RouteEstimator for StraightLineRouter {
    fn estimate(&self, origin: Coordinate, destination: Coordinate) -> anyhow::Result<RouteEstimate> {
        for point in [origin, destination] {
            ensure!(
                (-90.0..=90.0).contains(&point.lat) && (-180.0..=180.0).contains(&point.lng),
                "coordinate {:?} is not a valid position",
                point
            );
        }

        let distance_m = haversine_m(origin, destination) * self.detour_factor;
        let travel_seconds = distance_m / (self.speed_kmh / 3.6);
        Ok(RouteEstimate {
            distance_m: Some(distance_m),
            travel_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_matches_known_distance() {
        // One degree of latitude is roughly 111.2 km.
        let d = haversine_m(Coordinate::new(44.0, 11.0), Coordinate::new(45.0, 11.0));
        assert!((d - 111_195.0).abs() < 100.0);
    }

    #[test]
    fn travel_time_follows_speed() {
        let router = StraightLineRouter::new(36.0, 1.0).unwrap();
        let origin = Coordinate::new(44.0, 11.0);
        let destination = Coordinate::new(44.009, 11.0);
        let estimate = router.estimate(origin, destination).unwrap();
        let distance = estimate.distance_m.unwrap();
        assert!((estimate.travel_seconds - distance / 10.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_parameters_and_positions() {
        assert!(StraightLineRouter::new(0.0, 1.3).is_err());
        assert!(StraightLineRouter::new(30.0, 0.5).is_err());

        let router = StraightLineRouter::new(30.0, 1.3).unwrap();
        let bad = Coordinate::new(f64::NAN, 11.0);
        assert!(router.estimate(bad, Coordinate::new(44.0, 11.0)).is_err());
    }
}
