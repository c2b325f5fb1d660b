//! Replay progress observation.

use tracing::{debug, info, warn};

use crate::domain::{GeoPoint, RouteId};

use super::engine::ReplayState;
use super::schedule::StepWaits;

/// What happened during one replayed step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepProgress {
    pub route_id: RouteId,
    pub leg_index: usize,
    pub step_index: usize,
    pub waits: StepWaits,
    pub start: GeoPoint,
    pub end: GeoPoint,
}

/// Callbacks invoked by a running replay.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait ReplayObserver {
    /// Called after the vehicle reached the end of a step.
    fn on_step(&mut self, _progress: &StepProgress) {}

    /// Called once when the replay reaches its terminal state.
    fn on_finish(&mut self, _route_id: &RouteId, _state: &ReplayState) {}
}

/// Writes progress to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ReplayObserver for LogObserver {
    fn on_step(&mut self, p: &StepProgress) {
        debug!(
            route = %p.route_id,
            leg = p.leg_index,
            step = p.step_index,
            to_start_ms = p.waits.to_start_ms,
            to_end_ms = p.waits.to_end_ms,
            start = %p.start,
            end = %p.end,
            "step replayed"
        );
    }

    fn on_finish(&mut self, route_id: &RouteId, state: &ReplayState) {
        match state {
            ReplayState::Failed(e) => warn!(route = %route_id, error = %e, "replay failed"),
            _ => info!(route = %route_id, ?state, "replay finished"),
        }
    }
}

/// Collects every step's progress.
impl ReplayObserver for Vec<StepProgress> {
    fn on_step(&mut self, progress: &StepProgress) {
        self.push(progress.clone());
    }
}
