//! Drawing a route's markers on the map.

use tracing::{debug, info};

use crate::domain::{Route, RouteDirections, RouteId};
use crate::map::{MapError, MapSurface, RouteIcons};

/// Draw `route` on the map, replacing whatever was drawn before.
///
/// Clears every existing overlay, then places the start marker at the
/// route's overall start, the end marker at its overall end and the vehicle
/// marker at the start. A route without legs only clears the map.
pub async fn render_route<M: MapSurface>(route: &Route, map: &M) -> Result<(), MapError> {
    render_directions(&route.id, &route.directions, map).await?;
    info!(route = %route.id, name = %route.name, "route rendered");
    Ok(())
}

/// Draw `directions` under `route_id`. See [`render_route`].
pub async fn render_directions<M: MapSurface>(
    route_id: &RouteId,
    directions: &RouteDirections,
    map: &M,
) -> Result<(), MapError> {
    map.remove_all_routes();

    let (Some(start), Some(end)) = (directions.start_point(), directions.end_point()) else {
        debug!(route = %route_id, "no legs to draw");
        return Ok(());
    };

    map.add_route_with_icons(
        route_id,
        RouteIcons {
            start,
            end,
            vehicle: start,
        },
    )
    .await
}
