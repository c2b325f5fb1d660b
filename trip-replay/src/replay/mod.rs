//! Trip replay engine.
//!
//! Replays a vehicle's movement along a route at an accelerated pace:
//!
//! 1. [`schedule`] turns each step's nominal duration and a scale factor
//!    into two waits.
//! 2. [`ReplayPlan`] applies that to every step of a route, in order.
//! 3. [`start_replay`] runs the plan against a map surface and returns a
//!    [`ReplayHandle`] for cancellation and progress.
//!
//! [`render_route`] draws a route's start, end and vehicle markers.

mod engine;
mod error;
mod observer;
mod plan;
mod render;
pub mod schedule;

pub use engine::{
    Phase, ReplayCursor, ReplayHandle, ReplayState, run_replay, start_replay, start_replay_with,
};
pub use error::ReplayError;
pub use observer::{LogObserver, ReplayObserver, StepProgress};
pub use plan::{PlannedStep, ReplayPlan};
pub use render::{render_directions, render_route};
pub use schedule::{StepWaits, compute_step_waits};
