//! Trip replay engine.
//!
//! Replays a vehicle's recorded route on a map at an accelerated pace: each
//! step's real-world duration is divided by a scale factor and the vehicle
//! marker hops from step to step.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod driver;
pub mod map;
pub mod new_route;
pub mod replay;
