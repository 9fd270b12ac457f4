//! Geographic coordinates as the map and the lookup API exchange them.

use std::fmt;

use crate::numeric::fixed;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a position from optionally parsed components.
    ///
    /// Missing or non-finite components become 0, so a malformed response
    /// still lands somewhere on the map.
    pub fn or_origin(lat: Option<f64>, lng: Option<f64>) -> Self {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0);
        Self::new(finite(lat), finite(lng))
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", fixed(self.lat, 5), fixed(self.lng, 5))
    }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }
}
