//! A map surface that records every call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::{GeoPoint, RouteId};

use super::{MapError, MapSurface, RouteIcons};

/// A call made to a [`RecordingMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    AddRoute { route_id: RouteId, icons: RouteIcons },
    MoveCar { route_id: RouteId, point: GeoPoint },
    RemoveAll,
}

/// In-memory map surface.
///
/// Records calls in the order they arrive. Can be told to start failing
/// vehicle moves after a number of successful ones, or to reject the first
/// route draws.
#[derive(Debug, Default)]
pub struct RecordingMap {
    calls: Mutex<Vec<MapCall>>,
    fail_moves_after: Option<usize>,
    /// Number of upcoming `add_route_with_icons` calls to reject.
    failing_adds: AtomicUsize,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every vehicle move after the first `n` succeed.
    pub fn failing_moves_after(mut self, n: usize) -> Self {
        self.fail_moves_after = Some(n);
        self
    }

    /// Fail every `add_route_with_icons` call.
    pub fn failing_add(self) -> Self {
        self.failing_first_adds(usize::MAX)
    }

    /// Fail the next `n` `add_route_with_icons` calls, then recover.
    pub fn failing_first_adds(mut self, n: usize) -> Self {
        self.failing_adds = AtomicUsize::new(n);
        self
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<MapCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Points of every recorded vehicle move, oldest first.
    pub fn moves(&self) -> Vec<GeoPoint> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MapCall::MoveCar { point, .. } => Some(point),
                _ => None,
            })
            .collect()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: MapCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl MapSurface for RecordingMap {
    async fn add_route_with_icons(
        &self,
        route_id: &RouteId,
        icons: RouteIcons,
    ) -> Result<(), MapError> {
        let rejected = self
            .failing_adds
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if rejected {
            return Err(MapError::Surface("add rejected".to_string()));
        }
        self.record(MapCall::AddRoute {
            route_id: route_id.clone(),
            icons,
        });
        Ok(())
    }

    fn move_car(&self, route_id: &RouteId, point: GeoPoint) -> Result<(), MapError> {
        if let Some(limit) = self.fail_moves_after {
            if self.moves().len() >= limit {
                return Err(MapError::Surface("move rejected".to_string()));
            }
        }
        self.record(MapCall::MoveCar {
            route_id: route_id.clone(),
            point,
        });
        Ok(())
    }

    fn remove_all_routes(&self) {
        self.record(MapCall::RemoveAll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{point, route_id};

    #[tokio::test]
    async fn records_in_order() {
        let map = RecordingMap::new();
        let id = route_id("r1");
        let icons = RouteIcons {
            start: point(0.0, 0.0),
            end: point(1.0, 1.0),
            vehicle: point(0.0, 0.0),
        };

        map.remove_all_routes();
        map.add_route_with_icons(&id, icons).await.unwrap();
        map.move_car(&id, point(0.5, 0.5)).unwrap();

        assert_eq!(
            map.calls(),
            vec![
                MapCall::RemoveAll,
                MapCall::AddRoute {
                    route_id: id.clone(),
                    icons
                },
                MapCall::MoveCar {
                    route_id: id,
                    point: point(0.5, 0.5)
                },
            ]
        );
        assert_eq!(map.moves(), vec![point(0.5, 0.5)]);
    }

    #[test]
    fn fails_moves_after_limit() {
        let map = RecordingMap::new().failing_moves_after(1);
        let id = route_id("r1");
        assert!(map.move_car(&id, point(0.0, 0.0)).is_ok());
        assert!(map.move_car(&id, point(1.0, 1.0)).is_err());
        assert_eq!(map.moves().len(), 1);
    }

    #[tokio::test]
    async fn recovers_after_failing_adds() {
        let map = RecordingMap::new().failing_first_adds(1);
        let icons = RouteIcons {
            start: point(0.0, 0.0),
            end: point(1.0, 1.0),
            vehicle: point(0.0, 0.0),
        };
        assert!(map.add_route_with_icons(&route_id("r1"), icons).await.is_err());
        assert!(map.add_route_with_icons(&route_id("r1"), icons).await.is_ok());
        assert_eq!(map.calls().len(), 1);
    }

    #[tokio::test]
    async fn failing_add() {
        let map = RecordingMap::new().failing_add();
        let icons = RouteIcons {
            start: point(0.0, 0.0),
            end: point(1.0, 1.0),
            vehicle: point(0.0, 0.0),
        };
        assert!(map.add_route_with_icons(&route_id("r1"), icons).await.is_err());
        assert!(map.calls().is_empty());
    }
}
