//! Route entity and named places.

use chrono::{DateTime, Utc};

use super::{GeoPoint, RouteDirections, RouteId};

/// A named location: the origin or destination of a persisted route.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPlace {
    pub name: String,
    pub location: GeoPoint,
}

/// A persisted route, as owned by the backend.
///
/// Read-only from the replay engine's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Backend identifier; also keys the route's map overlays.
    pub id: RouteId,

    /// Display name, e.g. "Origin address >> Destination address".
    pub name: String,

    pub origin: NamedPlace,
    pub destination: NamedPlace,

    /// Directions of the first route alternative.
    pub directions: RouteDirections,

    /// Total distance in meters.
    pub distance: f64,

    /// Total duration in seconds.
    pub duration: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    /// Whether the route has at least one step to replay.
    pub fn is_replayable(&self) -> bool {
        self.directions.step_count() > 0
    }
}
