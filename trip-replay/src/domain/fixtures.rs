//! Test builders for domain values.

use chrono::{TimeZone, Utc};

use super::{GeoPoint, Leg, NamedPlace, Route, RouteDirections, RouteId, Step};

pub fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng)
}

pub fn route_id(s: &str) -> RouteId {
    RouteId::new(s.to_string()).unwrap()
}

/// Build a route from legs of `(start, end, duration_secs)` steps.
pub fn route(id: &str, legs: &[&[(GeoPoint, GeoPoint, Option<f64>)]]) -> Route {
    let legs = legs
        .iter()
        .map(|steps| {
            let steps = steps
                .iter()
                .map(|(start, end, duration)| Step::new(*start, *end, *duration))
                .collect();
            Leg::new(steps).unwrap()
        })
        .collect();
    route_with_directions(id, RouteDirections::new(legs))
}

pub fn route_with_directions(id: &str, directions: RouteDirections) -> Route {
    let origin = directions.start_point().unwrap_or(point(0.0, 0.0));
    let destination = directions.end_point().unwrap_or(point(0.0, 0.0));
    let created = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
    Route {
        id: route_id(id),
        name: format!("Route {id}"),
        origin: NamedPlace {
            name: "Origin".to_string(),
            location: origin,
        },
        destination: NamedPlace {
            name: "Destination".to_string(),
            location: destination,
        },
        directions,
        distance: 1000.0,
        duration: 620.0,
        created_at: created,
        updated_at: created,
    }
}

/// P0, P1, P2 of the two-step scenario route.
pub fn scenario_points() -> [GeoPoint; 3] {
    [point(0.0, 0.0), point(0.0, 1.0), point(1.0, 1.0)]
}

/// One leg, two steps: A (20 s, P0 → P1) and B (no duration, P1 → P2).
pub fn scenario_route(id: &str) -> Route {
    let [p0, p1, p2] = scenario_points();
    route(id, &[&[(p0, p1, Some(20.0)), (p1, p2, None)]])
}
