//! Creating a new route: look up two places, preview directions, save.

use std::future::Future;

use futures::future::join;
use tracing::{debug, info, warn};

use crate::api::{
    ApiClient, ApiError, DirectionsResponseDto, FindPlaceResponseDto, NewRoute, convert_directions,
    convert_place,
};
use crate::domain::{Place, Route, RouteDirections, RouteId};
use crate::map::{MapError, MapSurface};
use crate::replay::render_directions;

/// Prefix the directions provider puts on echoed place ids.
const PLACE_ID_PREFIX: &str = "place_id:";

/// Backend operations needed to plan and persist a route.
pub trait RoutePlanner {
    /// Look up places matching free text.
    fn find_place(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<FindPlaceResponseDto, ApiError>> + Send;

    /// Compute directions between two place ids.
    fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<DirectionsResponseDto, ApiError>> + Send;

    /// Persist a new route.
    fn create_route(&self, route: &NewRoute) -> impl Future<Output = Result<Route, ApiError>> + Send;
}

impl RoutePlanner for ApiClient {
    async fn find_place(&self, text: &str) -> Result<FindPlaceResponseDto, ApiError> {
        ApiClient::find_place(self, text).await
    }

    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponseDto, ApiError> {
        ApiClient::directions(self, origin, destination).await
    }

    async fn create_route(&self, route: &NewRoute) -> Result<Route, ApiError> {
        ApiClient::create_route(self, route).await
    }
}

/// Errors from planning a new route.
#[derive(Debug, thiserror::Error)]
pub enum NewRouteError {
    #[error("origin not found: {0}")]
    OriginNotFound(String),

    #[error("destination not found: {0}")]
    DestinationNotFound(String),

    /// The provider returned no usable route between the two places
    #[error("no directions between origin and destination")]
    NoDirections,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Directions previewed on the map but not yet saved.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDraft {
    pub directions: RouteDirections,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    /// Origin place id as echoed in the directions request.
    pub origin_place_id: String,
    /// Destination place id as echoed in the directions request.
    pub destination_place_id: String,
}

impl RouteDraft {
    /// Body for saving this draft.
    ///
    /// The name is `"<start address> >> <end address>"`, and place ids lose
    /// their `place_id:` prefix.
    pub fn to_new_route(&self) -> NewRoute {
        NewRoute {
            name: format!(
                "{} >> {}",
                self.start_address.as_deref().unwrap_or_default(),
                self.end_address.as_deref().unwrap_or_default()
            ),
            origin_id: strip_place_prefix(&self.origin_place_id).to_string(),
            destination_id: strip_place_prefix(&self.destination_place_id).to_string(),
        }
    }
}

fn strip_place_prefix(id: &str) -> &str {
    id.strip_prefix(PLACE_ID_PREFIX).unwrap_or(id)
}

/// Look up `origin` and `destination`, fetch directions between them and
/// draw the result under the placeholder route id.
///
/// Both lookups run concurrently. The map is cleared before drawing, even
/// when the provider finds no route.
pub async fn preview_route<P, M>(
    planner: &P,
    map: &M,
    origin: &str,
    destination: &str,
) -> Result<RouteDraft, NewRouteError>
where
    P: RoutePlanner,
    M: MapSurface,
{
    let (origin_place, destination_place) =
        join(planner.find_place(origin), planner.find_place(destination)).await;

    let origin_id = first_candidate(origin_place?)
        .ok_or_else(|| NewRouteError::OriginNotFound(origin.to_string()))?
        .place_id;
    let destination_id = first_candidate(destination_place?)
        .ok_or_else(|| NewRouteError::DestinationNotFound(destination.to_string()))?
        .place_id;

    let dto = planner.directions(&origin_id, &destination_id).await?;
    let directions = convert_directions(&dto);

    render_directions(&RouteId::draft(), &directions, map).await?;

    if directions.is_empty() {
        warn!(origin, destination, status = ?dto.status, "no directions found");
        return Err(NewRouteError::NoDirections);
    }

    let (origin_place_id, destination_place_id) = match dto.request {
        Some(request) => (request.origin.place_id, request.destination.place_id),
        None => (origin_id, destination_id),
    };

    let draft = RouteDraft {
        start_address: directions.start_address().map(str::to_string),
        end_address: directions.end_address().map(str::to_string),
        directions,
        origin_place_id,
        destination_place_id,
    };

    info!(
        start = draft.start_address.as_deref().unwrap_or("?"),
        end = draft.end_address.as_deref().unwrap_or("?"),
        steps = draft.directions.step_count(),
        "route previewed"
    );

    Ok(draft)
}

/// Persist a previewed draft.
pub async fn save_route<P: RoutePlanner>(planner: &P, draft: &RouteDraft) -> Result<Route, NewRouteError> {
    let body = draft.to_new_route();
    let route = planner.create_route(&body).await?;
    info!(route = %route.id, name = %route.name, "route saved");
    Ok(route)
}

fn first_candidate(found: FindPlaceResponseDto) -> Option<Place> {
    if !found.is_ok() {
        warn!(
            status = %found.status,
            message = found.error_message.as_deref().unwrap_or(""),
            "place lookup failed"
        );
        return None;
    }
    let place = found.candidates.first().map(convert_place)?;
    debug!(
        place_id = %place.place_id,
        address = place.formatted_address.as_deref().unwrap_or("?"),
        "place found"
    );
    Some(place)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::api::{PlaceCandidateDto, RouteDto};
    use crate::domain::fixtures::route_with_directions;
    use crate::domain::GeoPoint;
    use crate::map::{MapCall, RecordingMap, RouteIcons};

    const FIXTURE: &str = include_str!("../data/mock_routes/prudente-centro.json");

    struct FakePlanner {
        places: HashMap<String, FindPlaceResponseDto>,
        directions: DirectionsResponseDto,
        requested: Mutex<Vec<(String, String)>>,
        created: Mutex<Vec<NewRoute>>,
    }

    impl FakePlanner {
        fn new() -> Self {
            let dto: RouteDto = serde_json::from_str(FIXTURE).unwrap();
            let mut places = HashMap::new();
            places.insert("centro".to_string(), found("ChIJ-origin"));
            places.insert("parque".to_string(), found("ChIJ-destination"));
            Self {
                places,
                directions: dto.directions,
                requested: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
            }
        }
    }

    fn found(place_id: &str) -> FindPlaceResponseDto {
        FindPlaceResponseDto {
            candidates: vec![PlaceCandidateDto {
                place_id: place_id.to_string(),
                formatted_address: None,
                geometry: None,
            }],
            status: "OK".to_string(),
            error_message: None,
        }
    }

    fn zero_results() -> FindPlaceResponseDto {
        FindPlaceResponseDto {
            candidates: vec![],
            status: "ZERO_RESULTS".to_string(),
            error_message: None,
        }
    }

    impl RoutePlanner for FakePlanner {
        async fn find_place(&self, text: &str) -> Result<FindPlaceResponseDto, ApiError> {
            Ok(self.places.get(text).cloned().unwrap_or_else(zero_results))
        }

        async fn directions(
            &self,
            origin: &str,
            destination: &str,
        ) -> Result<DirectionsResponseDto, ApiError> {
            self.requested
                .lock()
                .unwrap()
                .push((origin.to_string(), destination.to_string()));
            Ok(self.directions.clone())
        }

        async fn create_route(&self, route: &NewRoute) -> Result<Route, ApiError> {
            self.created.lock().unwrap().push(route.clone());
            let mut stored = route_with_directions("saved", RouteDirections::empty());
            stored.name = route.name.clone();
            Ok(stored)
        }
    }

    #[tokio::test]
    async fn preview_draws_draft() {
        let planner = FakePlanner::new();
        let map = RecordingMap::new();

        let draft = preview_route(&planner, &map, "centro", "parque").await.unwrap();

        assert_eq!(
            planner.requested.lock().unwrap().clone(),
            vec![("ChIJ-origin".to_string(), "ChIJ-destination".to_string())]
        );
        assert_eq!(draft.directions.step_count(), 3);
        assert_eq!(draft.origin_place_id, "place_id:ChIJ-origin");

        let start = GeoPoint::new(-22.1256, -51.3889);
        let end = GeoPoint::new(-22.1198, -51.3921);
        assert_eq!(
            map.calls(),
            vec![
                MapCall::RemoveAll,
                MapCall::AddRoute {
                    route_id: RouteId::draft(),
                    icons: RouteIcons {
                        start,
                        end,
                        vehicle: start
                    },
                },
            ]
        );
    }

    #[tokio::test]
    async fn unknown_origin() {
        let planner = FakePlanner::new();
        let map = RecordingMap::new();

        let err = preview_route(&planner, &map, "nowhere", "parque").await.unwrap_err();
        assert!(matches!(err, NewRouteError::OriginNotFound(ref s) if s == "nowhere"));
        assert!(map.calls().is_empty());
        assert!(planner.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_destination() {
        let planner = FakePlanner::new();
        let map = RecordingMap::new();

        let err = preview_route(&planner, &map, "centro", "nowhere").await.unwrap_err();
        assert!(matches!(err, NewRouteError::DestinationNotFound(_)));
    }

    #[tokio::test]
    async fn ok_status_without_candidates() {
        let mut planner = FakePlanner::new();
        planner.places.insert(
            "empty".to_string(),
            FindPlaceResponseDto {
                candidates: vec![],
                status: "OK".to_string(),
                error_message: None,
            },
        );
        let map = RecordingMap::new();

        let err = preview_route(&planner, &map, "empty", "parque").await.unwrap_err();
        assert!(matches!(err, NewRouteError::OriginNotFound(_)));
    }

    #[tokio::test]
    async fn no_directions_clears_map() {
        let mut planner = FakePlanner::new();
        planner.directions.routes.clear();
        let map = RecordingMap::new();

        let err = preview_route(&planner, &map, "centro", "parque").await.unwrap_err();
        assert!(matches!(err, NewRouteError::NoDirections));
        assert_eq!(map.calls(), vec![MapCall::RemoveAll]);
    }

    #[tokio::test]
    async fn map_failure_propagates() {
        let planner = FakePlanner::new();
        let map = RecordingMap::new().failing_add();

        let err = preview_route(&planner, &map, "centro", "parque").await.unwrap_err();
        assert!(matches!(err, NewRouteError::Map(_)));
    }

    #[tokio::test]
    async fn save_strips_place_prefix() {
        let planner = FakePlanner::new();
        let map = RecordingMap::new();
        let draft = preview_route(&planner, &map, "centro", "parque").await.unwrap();

        let route = save_route(&planner, &draft).await.unwrap();

        let expected = NewRoute {
            name: "Av. Washington Luiz, Presidente Prudente - SP, Brasil >> Parque do Povo, Presidente Prudente - SP, Brasil".to_string(),
            origin_id: "ChIJ-origin".to_string(),
            destination_id: "ChIJ-destination".to_string(),
        };
        assert_eq!(planner.created.lock().unwrap().clone(), vec![expected.clone()]);
        assert_eq!(route.name, expected.name);
    }

    #[test]
    fn draft_without_prefix_or_addresses() {
        let draft = RouteDraft {
            directions: RouteDirections::empty(),
            start_address: None,
            end_address: Some("B".to_string()),
            origin_place_id: "abc".to_string(),
            destination_place_id: "place_id:def".to_string(),
        };
        let body = draft.to_new_route();
        assert_eq!(body.name, " >> B");
        assert_eq!(body.origin_id, "abc");
        assert_eq!(body.destination_id, "def");
    }
}
