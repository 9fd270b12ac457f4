use crate::geo::{GeoBounds, LatLng};

/// Mean Earth radius (meters) used for spherical approximations.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Bounding box of a circle of `radius_m` around `center`.
///
/// Longitude extent saturates to the full range near the poles.
pub fn circle_bounds(center: LatLng, radius_m: f64) -> GeoBounds {
    let dlat = (radius_m / MEAN_EARTH_RADIUS_M).to_degrees();
    let cos_lat = center.lat.to_radians().cos();
    let dlng = if cos_lat <= 1e-9 {
        180.0
    } else {
        (dlat / cos_lat).min(180.0)
    };

    GeoBounds::new(
        (center.lat - dlat).max(-90.0),
        (center.lng - dlng).max(-180.0),
        (center.lat + dlat).min(90.0),
        (center.lng + dlng).min(180.0),
    )
}
