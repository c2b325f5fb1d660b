//! Map surface error types.

use crate::domain::RouteId;

/// Errors reported by a map surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// The route was never added to the surface
    #[error("route {0} is not on the map")]
    UnknownRoute(RouteId),

    /// The surface failed to apply a call
    #[error("map surface error: {0}")]
    Surface(String),
}
