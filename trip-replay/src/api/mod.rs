//! Route backend client.
//!
//! This module provides an HTTP client for the route backend, which stores
//! routes and proxies place lookup and directions to the map provider.
//!
//! Key characteristics of the backend:
//! - `GET /routes/:id` may answer `200` with an `{ message, statusCode }`
//!   error body instead of a route
//! - Directions carry several alternatives; only the first is used
//! - Place ids echoed back in a directions request are prefixed `place_id:`

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{ApiClient, ApiConfig};
pub use convert::{ConversionError, convert_directions, convert_place, convert_route};
pub use error::ApiError;
pub use mock::MockRouteSource;
pub use types::{
    DirectionsResponseDto, ErrorPayload, FindPlaceResponseDto, NewRoute, PlaceCandidateDto,
    RouteDto,
};
