//! Step type: the smallest unit of directional movement.

use super::GeoPoint;

/// A single directed movement segment.
///
/// `duration_secs` is the real-world traversal time reported by the
/// directions provider. It is optional; when present it is always finite
/// and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    start: GeoPoint,
    end: GeoPoint,
    duration_secs: Option<f64>,
    /// Provider instruction text (HTML), e.g. "Turn <b>left</b>".
    pub instruction: Option<String>,
    /// Provider distance for this step, in meters.
    pub distance_meters: Option<f64>,
}

impl Step {
    /// Create a step between two points.
    ///
    /// A negative or non-finite duration is discarded, leaving the step
    /// without duration data.
    pub fn new(start: GeoPoint, end: GeoPoint, duration_secs: Option<f64>) -> Self {
        Self {
            start,
            end,
            duration_secs: duration_secs.filter(|d| d.is_finite() && *d >= 0.0),
            instruction: None,
            distance_meters: None,
        }
    }

    /// Attach instruction text.
    pub fn with_instruction(mut self, text: impl Into<String>) -> Self {
        self.instruction = Some(text.into());
        self
    }

    /// Attach a distance in meters.
    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    pub fn start(&self) -> GeoPoint {
        self.start
    }

    pub fn end(&self) -> GeoPoint {
        self.end
    }

    /// Nominal traversal time in seconds, if the provider reported one.
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }
}
