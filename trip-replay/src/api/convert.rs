//! Conversion from API DTOs to domain types.

use tracing::warn;

use crate::domain::{DomainError, Leg, NamedPlace, Place, Route, RouteDirections, RouteId, Step};

use super::types::{
    DirectionsResponseDto, LegDto, NamedPlaceDto, PlaceCandidateDto, RouteDto, StepDto,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A leg failed domain validation
    #[error("invalid leg: {0}")]
    InvalidLeg(#[from] DomainError),

    /// Missing or empty required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert a persisted route.
pub fn convert_route(dto: &RouteDto) -> Result<Route, ConversionError> {
    let id = RouteId::new(dto.id.clone()).map_err(|_| ConversionError::MissingField("id"))?;

    Ok(Route {
        id,
        name: dto.name.clone(),
        origin: convert_named_place(&dto.origin),
        destination: convert_named_place(&dto.destination),
        directions: convert_directions(&dto.directions),
        distance: dto.distance,
        duration: dto.duration,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    })
}

/// Convert the first alternative of a directions response.
///
/// A response with no alternatives converts to empty directions. Legs
/// without steps are skipped rather than failing the whole route.
pub fn convert_directions(dto: &DirectionsResponseDto) -> RouteDirections {
    let Some(first) = dto.routes.first() else {
        return RouteDirections::empty();
    };

    let legs = first
        .legs
        .iter()
        .enumerate()
        .filter_map(|(idx, leg)| match convert_leg(leg) {
            Ok(leg) => Some(leg),
            Err(e) => {
                warn!(leg = idx, error = %e, "skipping leg");
                None
            }
        })
        .collect();

    RouteDirections::new(legs)
}

/// Convert a place lookup candidate.
pub fn convert_place(dto: &PlaceCandidateDto) -> Place {
    Place {
        place_id: dto.place_id.clone(),
        location: dto.geometry.as_ref().map(|g| g.location),
        formatted_address: dto.formatted_address.clone(),
    }
}

fn convert_leg(dto: &LegDto) -> Result<Leg, ConversionError> {
    let steps = dto.steps.iter().map(convert_step).collect();
    let leg = Leg::new(steps)?;
    Ok(leg.with_addresses(dto.start_address.clone(), dto.end_address.clone()))
}

fn convert_step(dto: &StepDto) -> Step {
    let mut step = Step::new(
        dto.start_location,
        dto.end_location,
        dto.duration.as_ref().map(|d| d.value),
    );
    step.instruction = dto.html_instructions.clone();
    step.distance_meters = dto.distance.as_ref().map(|d| d.value);
    step
}

fn convert_named_place(dto: &NamedPlaceDto) -> NamedPlace {
    NamedPlace {
        name: dto.name.clone(),
        location: dto.location,
    }
}
