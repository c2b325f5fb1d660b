//! A map surface that writes to the log.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::config::MapConfig;
use crate::domain::{GeoPoint, RouteId};

use super::{MapError, MapSurface, RouteIcons};

/// Headless map surface.
///
/// Keeps the current vehicle position of every drawn route and logs each
/// call. Moving the vehicle of a route that was never added is an error,
/// as it would be on a real map.
#[derive(Debug)]
pub struct LogMap {
    center: GeoPoint,
    zoom: u8,
    vehicles: Mutex<HashMap<RouteId, GeoPoint>>,
}

impl LogMap {
    /// Create a surface centred on `center`, or on the configured default
    /// centre when no position is known.
    pub fn new(config: &MapConfig, center: Option<GeoPoint>) -> Self {
        let center = config.center_or_default(center);
        info!(%center, zoom = config.zoom, "map ready");
        Self {
            center,
            zoom: config.zoom,
            vehicles: Mutex::new(HashMap::new()),
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Current vehicle position of a drawn route.
    pub fn vehicle_position(&self, route_id: &RouteId) -> Option<GeoPoint> {
        self.vehicles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(route_id)
            .copied()
    }

    /// Number of routes currently drawn.
    pub fn route_count(&self) -> usize {
        self.vehicles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl MapSurface for LogMap {
    async fn add_route_with_icons(
        &self,
        route_id: &RouteId,
        icons: RouteIcons,
    ) -> Result<(), MapError> {
        info!(
            route = %route_id,
            start = %icons.start,
            end = %icons.end,
            vehicle = %icons.vehicle,
            "route drawn"
        );
        self.vehicles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(route_id.clone(), icons.vehicle);
        Ok(())
    }

    fn move_car(&self, route_id: &RouteId, point: GeoPoint) -> Result<(), MapError> {
        let mut vehicles = self.vehicles.lock().unwrap_or_else(PoisonError::into_inner);
        let position = vehicles
            .get_mut(route_id)
            .ok_or_else(|| MapError::UnknownRoute(route_id.clone()))?;
        *position = point;
        debug!(route = %route_id, %point, "vehicle moved");
        Ok(())
    }

    fn remove_all_routes(&self) {
        let mut vehicles = self.vehicles.lock().unwrap_or_else(PoisonError::into_inner);
        if !vehicles.is_empty() {
            debug!(count = vehicles.len(), "routes removed");
        }
        vehicles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{point, route_id};

    fn icons() -> RouteIcons {
        RouteIcons {
            start: point(0.0, 0.0),
            end: point(1.0, 1.0),
            vehicle: point(0.0, 0.0),
        }
    }

    #[test]
    fn defaults_to_configured_center() {
        let config = MapConfig::default();
        let map = LogMap::new(&config, None);
        assert_eq!(map.center(), config.default_center);
        assert_eq!(map.zoom(), 15);

        let here = point(51.5, -0.12);
        assert_eq!(LogMap::new(&config, Some(here)).center(), here);
    }

    #[tokio::test]
    async fn tracks_vehicle_position() {
        let map = LogMap::new(&MapConfig::default(), None);
        let id = route_id("r1");

        map.add_route_with_icons(&id, icons()).await.unwrap();
        assert_eq!(map.vehicle_position(&id), Some(point(0.0, 0.0)));

        map.move_car(&id, point(0.5, 0.5)).unwrap();
        assert_eq!(map.vehicle_position(&id), Some(point(0.5, 0.5)));
    }

    #[test]
    fn move_unknown_route_fails() {
        let map = LogMap::new(&MapConfig::default(), None);
        let id = route_id("missing");
        assert_eq!(
            map.move_car(&id, point(0.0, 0.0)),
            Err(MapError::UnknownRoute(id))
        );
    }

    #[tokio::test]
    async fn remove_all_clears_routes() {
        let map = LogMap::new(&MapConfig::default(), None);
        map.add_route_with_icons(&route_id("a"), icons()).await.unwrap();
        map.add_route_with_icons(&route_id("b"), icons()).await.unwrap();
        assert_eq!(map.route_count(), 2);

        map.remove_all_routes();
        assert_eq!(map.route_count(), 0);
        assert!(map.move_car(&route_id("a"), point(0.0, 0.0)).is_err());
    }
}
