//! Great-circle distance on a spherical Earth.

use crate::model::building::GeoPoint;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters between two points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// [`haversine_distance`] over [`GeoPoint`] values.
pub fn distance_between(from: GeoPoint, to: GeoPoint) -> f64 {
    haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}

#[cfg(test)]
mod tests {
    use super::{distance_between, haversine_distance};
    use crate::model::building::GeoPoint;

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_distance(55.7558, 37.6176, 55.7558, 37.6176), 0.0);
        assert_eq!(haversine_distance(-90.0, 180.0, -90.0, 180.0), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (GeoPoint::new(55.7558, 37.6176), GeoPoint::new(55.6602, 37.4805)),
            (GeoPoint::new(-33.8688, 151.2093), GeoPoint::new(51.5074, -0.1278)),
            (GeoPoint::new(89.999, 10.0), GeoPoint::new(89.999, -170.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_between(a, b), distance_between(b, a));
        }
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let meters = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((meters - 111_195.0).abs() < 1.0, "got {meters}");
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let meters = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let expected = std::f64::consts::PI * super::EARTH_RADIUS_METERS;
        assert!((meters - expected).abs() < 1e-3);
    }
}
