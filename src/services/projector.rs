use crate::constants::EARTH_RADIUS_KM;
use crate::models::{Coordinates, DistanceMeters};
use rand::Rng;
use std::f64::consts::TAU;

/// A destination computed from an origin, a distance and a bearing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Initial bearing in radians, clockwise from north, in [0, 2π)
    pub bearing_rad: f64,
    pub destination: Coordinates,
}

impl Projection {
    pub fn bearing_deg(&self) -> f64 {
        self.bearing_rad.to_degrees()
    }
}

/// Great-circle destination point on a spherical Earth
///
/// `bearing_rad` is measured clockwise from true north. The resulting
/// longitude is normalised into [-180, 180).
pub fn destination(origin: &Coordinates, distance: DistanceMeters, bearing_rad: f64) -> Coordinates {
    let angular = distance.to_km().as_km() / EARTH_RADIUS_KM;

    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing_rad.cos()).asin();
    let lng2 = lng1
        + (bearing_rad.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    Coordinates {
        lat: lat2.to_degrees().clamp(-90.0, 90.0),
        lng: normalize_longitude(lng2.to_degrees()),
    }
}

/// Project `distance` away from `origin` along a uniformly random bearing
pub fn random_point<R: Rng + ?Sized>(
    origin: &Coordinates,
    distance: DistanceMeters,
    rng: &mut R,
) -> Projection {
    let bearing_rad = rng.gen_range(0.0..TAU);

    Projection {
        bearing_rad,
        destination: destination(origin, distance, bearing_rad),
    }
}

/// Wrap a longitude in degrees into [-180, 180)
fn normalize_longitude(lng: f64) -> f64 {
    (lng + 540.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Meters spanned by one degree of arc on the model sphere
    const ONE_DEGREE_M: f64 = EARTH_RADIUS_KM * 1000.0 * PI / 180.0;

    fn c(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    fn m(meters: f64) -> DistanceMeters {
        DistanceMeters::new(meters).unwrap()
    }

    #[test]
    fn test_destination_due_north_and_east() {
        let origin = c(0.0, 0.0);

        let north = destination(&origin, m(ONE_DEGREE_M), 0.0);
        assert!((north.lat - 1.0).abs() < 1e-9, "north.lat={}", north.lat);
        assert!(north.lng.abs() < 1e-9);

        let east = destination(&origin, m(ONE_DEGREE_M), FRAC_PI_2);
        assert!(east.lat.abs() < 1e-9);
        assert!((east.lng - 1.0).abs() < 1e-9, "east.lng={}", east.lng);
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let origin = c(48.8566, 2.3522);
        let same = destination(&origin, m(0.0), 1.234);
        assert!((same.lat - origin.lat).abs() < 1e-12);
        assert!((same.lng - origin.lng).abs() < 1e-12);
    }

    #[test]
    fn test_destination_distance_matches_haversine() {
        let origin = c(48.8566, 2.3522);
        for bearing_deg in [0.0_f64, 45.0, 133.0, 270.0, 359.0] {
            let dest = destination(&origin, m(2500.0), bearing_deg.to_radians());
            let dist = origin.distance_m_to(&dest);
            assert!(
                (dist - 2500.0).abs() < 1e-3,
                "bearing {} gave {}m",
                bearing_deg,
                dist
            );
        }
    }

    #[test]
    fn test_crossing_antimeridian_wraps_longitude() {
        let origin = c(0.0, 179.9);
        let dest = destination(&origin, m(50_000.0), FRAC_PI_2);
        assert!(dest.lng < 0.0, "dest.lng={}", dest.lng);
        assert!(dest.lng >= -180.0);
        assert!(Coordinates::new(dest.lat, dest.lng).is_ok());
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(10.0), 10.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(180.0), -180.0);
    }

    #[test]
    fn test_random_point_is_reproducible_with_seed() {
        let origin = c(-33.8688, 151.2093);
        let a = random_point(&origin, m(1000.0), &mut StdRng::seed_from_u64(7));
        let b = random_point(&origin, m(1000.0), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_point_respects_distance() {
        let origin = c(51.5074, -0.1278);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let p = random_point(&origin, m(750.0), &mut rng);
            assert!((0.0..TAU).contains(&p.bearing_rad));
            assert!((0.0..360.0).contains(&p.bearing_deg()));
            let dist = origin.distance_m_to(&p.destination);
            assert!((dist - 750.0).abs() < 1e-3, "dist={}", dist);
        }
    }
}
