// Geodesy module - great-circle distance, bearing, and scope projection
//
// Everything here is a pure function over degrees/nautical miles.
// Inputs are not validated; coordinates outside the usual ranges produce
// mathematically defined but meaningless results. Validation happens at
// the configuration boundary (settings module), not here.

use std::f64::consts::PI;

use crate::constants::EARTH_RADIUS_NM;

/// Degrees to radians conversion factor
const DTOR: f64 = PI / 180.0;

/// Radians to degrees conversion factor
const RTOD: f64 = 180.0 / PI;

/// Returns great-circle distance in nautical miles between two points
///
/// Haversine formula over a spherical Earth (R = 3440.065 NM). Altitude
/// is ignored.
///
/// # Arguments
/// * `ref_lat`, `ref_lon` - Reference point (latitude, longitude) in degrees
/// * `lat`, `lon` - Target point (latitude, longitude) in degrees
pub fn distance_nm(ref_lat: f64, ref_lon: f64, lat: f64, lon: f64) -> f64 {
    let ref_lat_rad = ref_lat * DTOR;
    let lat_rad = lat * DTOR;
    let dlat = (lat - ref_lat) * DTOR;
    let dlon = (lon - ref_lon) * DTOR;

    let a = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + ref_lat_rad.cos() * lat_rad.cos() * (dlon / 2.0).sin() * (dlon / 2.0).sin();

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Returns the initial true bearing from the reference point to the target
///
/// 0° = true north, increasing clockwise, normalized to [0, 360).
pub fn bearing_deg(ref_lat: f64, ref_lon: f64, lat: f64, lon: f64) -> f64 {
    let ref_lat_rad = ref_lat * DTOR;
    let lat_rad = lat * DTOR;
    let dlon_rad = (lon - ref_lon) * DTOR;

    let y = dlon_rad.sin() * lat_rad.cos();
    let x = ref_lat_rad.cos() * lat_rad.sin()
        - ref_lat_rad.sin() * lat_rad.cos() * dlon_rad.cos();

    let bearing = y.atan2(x) * RTOD;

    // Normalize to 0-360
    (bearing + 360.0) % 360.0
}

/// Converts a polar scope position to absolute screen coordinates
///
/// Bearing 0° maps to "up" (north) and increases clockwise; screen y
/// grows downward, so north is rotated to the top by subtracting 90°
/// before the trig.
///
/// # Arguments
/// * `distance_nm` - Distance from the scope center in nautical miles
/// * `bearing_deg` - True bearing in degrees
/// * `pixels_per_nm` - Display radius in pixels divided by radar radius in NM
/// * `center_x`, `center_y` - Scope center in screen pixels
pub fn project(
    distance_nm: f64,
    bearing_deg: f64,
    pixels_per_nm: f64,
    center_x: i32,
    center_y: i32,
) -> (i32, i32) {
    let radius_px = distance_nm * pixels_per_nm;

    let angle_rad = (bearing_deg - 90.0) * DTOR;

    let dx = (radius_px * angle_rad.cos()) as i32;
    let dy = (radius_px * angle_rad.sin()) as i32;

    (center_x + dx, center_y + dy)
}
