//! Domain types for route replay.
//!
//! This module contains the core domain model types: points, steps, legs,
//! directions and routes. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod directions;
mod error;
mod leg;
mod place;
mod point;
mod route;
mod route_id;
mod step;

pub use directions::RouteDirections;
pub use error::DomainError;
pub use leg::Leg;
pub use place::Place;
pub use point::GeoPoint;
pub use route::{NamedPlace, Route};
pub use route_id::RouteId;
pub use step::Step;

#[cfg(test)]
pub(crate) mod fixtures;
