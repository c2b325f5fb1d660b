//! Map surface capability.
//!
//! The replay engine never draws anything itself. It asks a [`MapSurface`]
//! to place a route's markers and to move the vehicle marker. The real
//! surface (an interactive web map) lives outside this crate; [`LogMap`]
//! writes every call to the log for headless runs. Tests use an in-memory
//! recording surface.

mod error;
mod log;
#[cfg(test)]
mod recording;

use std::future::Future;

use crate::domain::{GeoPoint, RouteId};

pub use error::MapError;
pub use log::LogMap;
#[cfg(test)]
pub use recording::{MapCall, RecordingMap};

/// Marker positions for a rendered route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteIcons {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Initial vehicle position.
    pub vehicle: GeoPoint,
}

/// Rendering capability consumed by the replay engine.
///
/// The surface is shared and externally owned, so every method takes
/// `&self`. Calls are applied in the order they are issued.
pub trait MapSurface {
    /// Draw a route with start, end and vehicle markers, keyed by `route_id`.
    fn add_route_with_icons(
        &self,
        route_id: &RouteId,
        icons: RouteIcons,
    ) -> impl Future<Output = Result<(), MapError>> + Send;

    /// Move the vehicle marker of `route_id` to `point`.
    fn move_car(&self, route_id: &RouteId, point: GeoPoint) -> Result<(), MapError>;

    /// Remove every drawn route and its markers.
    fn remove_all_routes(&self);
}
