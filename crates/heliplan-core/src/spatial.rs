//! Great-circle geometry and wind resolution.

use crate::models::Position;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const METERS_PER_NM: f64 = 1_852.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two positions in nautical miles.
pub fn distance_nm(from: Position, to: Position) -> f64 {
    haversine_distance(from.lat, from.lon, to.lat, to.lon) / METERS_PER_NM
}

/// Calculate bearing from point 1 to point 2 in radians.
/// Returns bearing in radians, 0 = north, π/2 = east.
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    x.atan2(y)
}

/// Initial true course from one position to another, degrees in [0, 360).
pub fn initial_bearing_deg(from: Position, to: Position) -> f64 {
    normalize_degrees(bearing(from.lat, from.lon, to.lat, to.lon).to_degrees())
}

pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wind component along the aircraft's course in knots.
///
/// Positive is a headwind, negative a tailwind. `wind_direction_deg` is the
/// direction the wind blows from.
pub fn headwind_component(wind_speed_kt: f64, wind_direction_deg: f64, heading_deg: f64) -> f64 {
    if wind_speed_kt == 0.0 {
        return 0.0;
    }
    wind_speed_kt * (heading_deg - wind_direction_deg).to_radians().cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> Position {
        Position { lat, lon }
    }

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(57.48, 1.35, 57.48, 1.35);
        assert!(dist < 0.001);
    }

    #[test]
    fn one_degree_of_latitude_is_about_sixty_nm() {
        let nm = distance_nm(pos(57.0, 1.0), pos(58.0, 1.0));
        assert!((nm - 60.04).abs() < 0.1, "got {nm}");
    }

    #[test]
    fn cardinal_bearings() {
        let origin = pos(0.0, 0.0);
        assert!((initial_bearing_deg(origin, pos(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((initial_bearing_deg(origin, pos(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((initial_bearing_deg(origin, pos(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((initial_bearing_deg(origin, pos(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn headwind_sign_convention() {
        // Flying east into an easterly wind
        assert!((headwind_component(20.0, 90.0, 90.0) - 20.0).abs() < 1e-9);
        // Flying east with a westerly wind behind
        assert!((headwind_component(20.0, 270.0, 90.0) + 20.0).abs() < 1e-9);
        // Pure crosswind
        assert!(headwind_component(20.0, 0.0, 90.0).abs() < 1e-9);
        assert_eq!(headwind_component(0.0, 123.0, 45.0), 0.0);
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert!((normalize_degrees(-45.0) - 315.0).abs() < 1e-9);
        assert!((normalize_degrees(720.0)).abs() < 1e-9);
    }
}
