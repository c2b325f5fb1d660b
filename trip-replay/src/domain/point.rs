//! Geographic point type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in floating-point degrees.
///
/// Serializes as `{"lat": .., "lng": ..}`, the literal form used by the
/// directions provider and the map surface.
///
/// # Examples
///
/// ```
/// use trip_replay::domain::GeoPoint;
///
/// let p = GeoPoint::new(-22.1283, -51.4009);
/// assert_eq!(p.lat, -22.1283);
/// assert_eq!(p.to_string(), "(-22.1283, -51.4009)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
