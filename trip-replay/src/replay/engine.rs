//! Replay execution and lifecycle.
//!
//! A replay moves the vehicle marker through every step of a
//! [`ReplayPlan`]: wait, move to the step's start, wait, move to the step's
//! end. Cancellation is cooperative: it is checked before every wait and
//! before every move, and never interrupts a wait already in progress.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::info;

use crate::domain::{Route, RouteId};
use crate::map::{MapError, MapSurface};

use super::error::ReplayError;
use super::observer::{LogObserver, ReplayObserver, StepProgress};
use super::plan::{PlannedStep, ReplayPlan};

/// Which end of the current step the vehicle is heading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ApproachingStart,
    ApproachingEnd,
}

/// Position of a replay within its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayCursor {
    pub leg_index: usize,
    pub step_index: usize,
    pub phase: Phase,
}

impl ReplayCursor {
    fn at(step: &PlannedStep, phase: Phase) -> Self {
        Self {
            leg_index: step.leg_index,
            step_index: step.step_index,
            phase,
        }
    }
}

/// Lifecycle state of a replay.
///
/// `Running` is the only non-terminal state. Once a terminal state is
/// reached it never changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayState {
    Running,
    /// Every step was replayed.
    Completed,
    /// Cancelled before the last step finished.
    Cancelled,
    /// The map surface rejected a move.
    Failed(MapError),
}

impl ReplayState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReplayState::Running)
    }
}

#[derive(Debug, Clone)]
struct Status {
    state: ReplayState,
    cursor: ReplayCursor,
}

#[derive(Debug)]
struct Shared {
    route_id: RouteId,
    cancelled: AtomicBool,
    status: watch::Sender<Status>,
}

/// Handle to a running (or finished) replay.
///
/// Cheap to clone; every clone observes and controls the same replay.
#[derive(Debug, Clone)]
pub struct ReplayHandle {
    shared: Arc<Shared>,
}

impl ReplayHandle {
    /// Create a handle in the `Running` state, for use with [`run_replay`].
    pub fn new(route_id: RouteId) -> Self {
        let status = Status {
            state: ReplayState::Running,
            cursor: ReplayCursor {
                leg_index: 0,
                step_index: 0,
                phase: Phase::ApproachingStart,
            },
        };
        let (tx, _rx) = watch::channel(status);
        Self {
            shared: Arc::new(Shared {
                route_id,
                cancelled: AtomicBool::new(false),
                status: tx,
            }),
        }
    }

    pub fn route_id(&self) -> &RouteId {
        &self.shared.route_id
    }

    /// Request cancellation.
    ///
    /// No wait or move starts after this returns. Moves already made are
    /// kept. Has no effect on a replay that already finished.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
        if self.settle(ReplayState::Cancelled) {
            info!(route = %self.shared.route_id, "replay cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> ReplayState {
        self.shared.status.borrow().state.clone()
    }

    pub fn cursor(&self) -> ReplayCursor {
        self.shared.status.borrow().cursor
    }

    pub fn is_finished(&self) -> bool {
        self.shared.status.borrow().state.is_terminal()
    }

    /// Wait until the replay reaches a terminal state and return it.
    pub async fn finished(&self) -> ReplayState {
        let mut rx = self.shared.status.subscribe();
        match rx.wait_for(|s| s.state.is_terminal()).await {
            Ok(status) => status.state.clone(),
            // The sender lives as long as `self`, so this is unreachable.
            Err(_) => self.state(),
        }
    }

    /// Move to a terminal state. Returns false if already terminal.
    fn settle(&self, state: ReplayState) -> bool {
        self.shared.status.send_if_modified(|s| {
            if s.state.is_terminal() {
                return false;
            }
            s.state = state;
            true
        })
    }

    fn advance(&self, cursor: ReplayCursor) {
        self.shared.status.send_if_modified(|s| {
            if s.state.is_terminal() {
                return false;
            }
            s.cursor = cursor;
            true
        });
    }
}

/// Start replaying `route` on the current tokio runtime.
///
/// Progress is logged through [`LogObserver`]. A second replay of the same
/// route is not cancelled automatically; callers must cancel the previous
/// handle first.
///
/// # Errors
///
/// Returns [`ReplayError::NoActiveRoute`] if the route has no step. No
/// marker is moved in that case.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn start_replay<M>(route: &Route, scale: f64, map: Arc<M>) -> Result<ReplayHandle, ReplayError>
where
    M: MapSurface + Send + Sync + 'static,
{
    let plan = ReplayPlan::build(route, scale)?;
    Ok(start_replay_with(plan, map, LogObserver))
}

/// Start replaying a prebuilt plan with a custom observer.
pub fn start_replay_with<M, O>(plan: ReplayPlan, map: Arc<M>, mut observer: O) -> ReplayHandle
where
    M: MapSurface + Send + Sync + 'static,
    O: ReplayObserver + Send + 'static,
{
    let handle = ReplayHandle::new(plan.route_id().clone());
    let task_handle = handle.clone();
    tokio::spawn(async move {
        run_replay(&plan, map.as_ref(), &mut observer, &task_handle).await;
    });
    handle
}

/// Drive a plan to completion on the caller's task.
///
/// Returns the terminal state, which is also published on `handle`.
pub async fn run_replay<M, O>(
    plan: &ReplayPlan,
    map: &M,
    observer: &mut O,
    handle: &ReplayHandle,
) -> ReplayState
where
    M: MapSurface,
    O: ReplayObserver,
{
    info!(
        route = %plan.route_id(),
        steps = plan.steps().len(),
        scale = plan.scale(),
        "replay started"
    );

    let terminal = match drive(plan, map, observer, handle).await {
        Ok(()) => ReplayState::Completed,
        Err(Stop::Cancelled) => ReplayState::Cancelled,
        Err(Stop::Failed(e)) => ReplayState::Failed(e),
    };
    handle.settle(terminal);

    let state = handle.state();
    observer.on_finish(plan.route_id(), &state);
    state
}

enum Stop {
    Cancelled,
    Failed(MapError),
}

impl From<MapError> for Stop {
    fn from(err: MapError) -> Self {
        Stop::Failed(err)
    }
}

fn check(handle: &ReplayHandle) -> Result<(), Stop> {
    if handle.is_cancelled() {
        Err(Stop::Cancelled)
    } else {
        Ok(())
    }
}

async fn drive<M, O>(
    plan: &ReplayPlan,
    map: &M,
    observer: &mut O,
    handle: &ReplayHandle,
) -> Result<(), Stop>
where
    M: MapSurface,
    O: ReplayObserver,
{
    let route_id = plan.route_id();

    check(handle)?;
    map.move_car(route_id, plan.first_point())?;

    for step in plan.steps() {
        handle.advance(ReplayCursor::at(step, Phase::ApproachingStart));
        check(handle)?;
        tokio::time::sleep(step.waits.to_start()).await;
        check(handle)?;
        map.move_car(route_id, step.start)?;

        handle.advance(ReplayCursor::at(step, Phase::ApproachingEnd));
        check(handle)?;
        tokio::time::sleep(step.waits.to_end()).await;
        check(handle)?;
        map.move_car(route_id, step.end)?;

        observer.on_step(&StepProgress {
            route_id: route_id.clone(),
            leg_index: step.leg_index,
            step_index: step.step_index,
            waits: step.waits,
            start: step.start,
            end: step.end,
        });
    }

    Ok(())
}
