//! Replay plans: the time-scaled schedule of a whole route.

use std::time::Duration;

use crate::domain::{GeoPoint, Route, RouteId};

use super::error::ReplayError;
use super::schedule::{StepWaits, compute_step_waits};

/// One scheduled step of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStep {
    pub leg_index: usize,
    pub step_index: usize,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub waits: StepWaits,
}

/// The schedule of a replay, in strict leg-then-step order.
///
/// Built from a route's directions and a scale factor. A plan always has
/// at least one step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayPlan {
    route_id: RouteId,
    scale: f64,
    steps: Vec<PlannedStep>,
}

impl ReplayPlan {
    /// Build the schedule for `route` at the given scale.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::NoActiveRoute`] if the route has no step.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_replay::domain::{GeoPoint, Leg, RouteDirections, Step};
    /// use trip_replay::replay::ReplayPlan;
    /// # use trip_replay::domain::{NamedPlace, Route, RouteId};
    /// # use chrono::Utc;
    ///
    /// let (p0, p1) = (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
    /// let leg = Leg::new(vec![Step::new(p0, p1, Some(20.0))]).unwrap();
    /// # let route = Route {
    /// #     id: RouteId::new("r1".into()).unwrap(),
    /// #     name: "r1".into(),
    /// #     origin: NamedPlace { name: "a".into(), location: p0 },
    /// #     destination: NamedPlace { name: "b".into(), location: p1 },
    /// #     directions: RouteDirections::new(vec![leg]),
    /// #     distance: 0.0,
    /// #     duration: 20.0,
    /// #     created_at: Utc::now(),
    /// #     updated_at: Utc::now(),
    /// # };
    /// let plan = ReplayPlan::build(&route, 100.0).unwrap();
    /// assert_eq!(plan.steps().len(), 1);
    /// assert_eq!(plan.steps()[0].waits.to_start_ms, 100.0);
    /// ```
    pub fn build(route: &Route, scale: f64) -> Result<Self, ReplayError> {
        let steps: Vec<PlannedStep> = route
            .directions
            .steps()
            .map(|(leg_index, step_index, step)| PlannedStep {
                leg_index,
                step_index,
                start: step.start(),
                end: step.end(),
                waits: compute_step_waits(step.duration_secs(), scale),
            })
            .collect();

        if steps.is_empty() {
            return Err(ReplayError::NoActiveRoute);
        }

        Ok(Self {
            route_id: route.id.clone(),
            scale,
            steps,
        })
    }

    /// Cap the total wait of every step. `None` leaves waits unbounded.
    pub fn with_max_step_wait(mut self, max: Option<Duration>) -> Self {
        if let Some(max) = max {
            for step in &mut self.steps {
                step.waits = step.waits.capped(max);
            }
        }
        self
    }

    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    /// The scale factor as supplied by the caller.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Where the vehicle is placed before the first wait.
    pub fn first_point(&self) -> GeoPoint {
        self.steps[0].start
    }

    /// Sum of every wait in the plan, saturating.
    pub fn total_wait(&self) -> Duration {
        self.steps.iter().fold(Duration::ZERO, |acc, s| {
            acc.saturating_add(s.waits.to_start())
                .saturating_add(s.waits.to_end())
        })
    }
}
