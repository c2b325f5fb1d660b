//! Backend API DTOs.
//!
//! These types map directly to the backend's JSON. The directions payload
//! is the upstream directions provider's response, passed through
//! unchanged, so field names follow that provider (`snake_case`,
//! `{text, value}` pairs, `{lat, lng}` literals). Optional fields are
//! `Option` because the provider omits rather than nulls them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::GeoPoint;

/// A provider quantity with its display text, e.g. `{"text": "5 mins", "value": 272}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}

/// Encoded polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineDto {
    pub points: String,
}

/// One step of a directions leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDto {
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,

    /// Traversal time; `value` is in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,

    /// Distance; `value` is in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_instructions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<PolylineDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maneuver: Option<String>,
}

/// One leg of a directions route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegDto {
    #[serde(default)]
    pub steps: Vec<StepDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,
}

/// One alternative route in a directions response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRouteDto {
    #[serde(default)]
    pub legs: Vec<LegDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview_polyline: Option<PolylineDto>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A place echoed back in the directions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPlaceDto {
    /// Provider place id, possibly prefixed with `place_id:`.
    pub place_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// The request the backend sent to the directions provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequestDto {
    pub origin: RequestPlaceDto,
    pub destination: RequestPlaceDto,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Response from `GET /directions`, also embedded in every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponseDto {
    /// Alternative routes; the first one is used.
    #[serde(default)]
    pub routes: Vec<DirectionsRouteDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<DirectionsRequestDto>,
}

/// Origin or destination of a persisted route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPlaceDto {
    pub name: String,
    pub location: GeoPoint,
}

/// A persisted route, from `GET /routes` and `GET /routes/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDto {
    pub id: String,
    pub name: String,
    pub origin: NamedPlaceDto,
    pub destination: NamedPlaceDto,
    pub distance: f64,
    pub duration: f64,
    pub directions: DirectionsResponseDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Error message: a single string, or a list for validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::One(msg) => f.write_str(msg),
            ErrorMessage::Many(msgs) => f.write_str(&msgs.join("; ")),
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: ErrorMessage,

    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Body of `GET /routes/:id`: a route, or an error payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteResponse {
    Error(ErrorPayload),
    Route(Box<RouteDto>),
}

/// Location wrapper in place candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDto {
    pub location: GeoPoint,
}

/// A candidate from `GET /places`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidateDto {
    pub place_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryDto>,
}

/// Response from `GET /places?text=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindPlaceResponseDto {
    #[serde(default)]
    pub candidates: Vec<PlaceCandidateDto>,

    /// `"OK"` on success; anything else means no usable result.
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FindPlaceResponseDto {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Body of `POST /routes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    pub name: String,
    pub origin_id: String,
    pub destination_id: String,
}
