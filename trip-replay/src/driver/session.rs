//! The driver screen: pick a route, show it, replay it.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::PlaybackConfig;
use crate::domain::{Route, RouteId};
use crate::map::MapSurface;
use crate::replay::{LogObserver, ReplayError, ReplayHandle, ReplayPlan, render_route, start_replay_with};

use super::RouteSource;

/// Route selection and trip control over an injected source and map.
///
/// At most one replay is active at a time. Starting a trip cancels the
/// previous one, and so does a selection that changes or clears the
/// displayed route.
pub struct DriverSession<S, M> {
    source: S,
    map: Arc<M>,
    playback: PlaybackConfig,
    current: Option<Route>,
    /// Whether `current` made it onto the map.
    drawn: bool,
    active: Option<ReplayHandle>,
}

impl<S, M> DriverSession<S, M>
where
    S: RouteSource,
    M: MapSurface + Send + Sync + 'static,
{
    pub fn new(source: S, map: Arc<M>, playback: PlaybackConfig) -> Self {
        Self {
            source,
            map,
            playback,
            current: None,
            drawn: false,
            active: None,
        }
    }

    /// Available routes; a listing failure yields an empty list.
    pub async fn routes(&self) -> Vec<Route> {
        match self.source.list().await {
            Ok(routes) => routes,
            Err(e) => {
                warn!(error = %e, "failed to list routes");
                Vec::new()
            }
        }
    }

    /// Resolve and display the route with `id`.
    ///
    /// An empty id or a resolution failure clears the map and returns
    /// `None`. A route is drawn only when it differs from the one already
    /// displayed, or when drawing it last time failed.
    pub async fn select_route(&mut self, id: &str) -> Option<&Route> {
        let Ok(route_id) = RouteId::new(id.to_string()) else {
            info!("no route selected");
            self.clear();
            return None;
        };

        let route = match self.source.get(&route_id).await {
            Ok(route) => route,
            Err(e) => {
                warn!(
                    route = %route_id,
                    error = %e,
                    server_error = e.is_server_error(),
                    "route resolution failed"
                );
                self.clear();
                return None;
            }
        };

        if self.current.as_ref() != Some(&route) || !self.drawn {
            self.stop_active();
            self.drawn = match render_route(&route, self.map.as_ref()).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(route = %route.id, error = %e, "failed to draw route");
                    false
                }
            };
            self.current = Some(route);
        }

        self.current.as_ref()
    }

    /// Start replaying the current route at `scale`.
    ///
    /// Returns `None`, after logging, if no route is selected or the route
    /// has nothing to replay.
    pub fn start_trip(&mut self, scale: f64) -> Option<ReplayHandle> {
        let Some(route) = &self.current else {
            error!(error = %ReplayError::NoActiveRoute, "cannot start trip");
            return None;
        };

        let plan = match ReplayPlan::build(route, scale) {
            Ok(plan) => plan.with_max_step_wait(self.playback.max_step_wait),
            Err(e) => {
                error!(route = %route.id, error = %e, "cannot start trip");
                return None;
            }
        };

        info!(
            route = %route.id,
            scale,
            expected = ?plan.total_wait(),
            "trip started"
        );
        self.stop_active();

        let handle = start_replay_with(plan, Arc::clone(&self.map), LogObserver);
        self.active = Some(handle.clone());
        Some(handle)
    }

    /// Start replaying the current route at the configured scale.
    pub fn start_trip_default(&mut self) -> Option<ReplayHandle> {
        self.start_trip(self.playback.scale)
    }

    /// Cancel the active replay, if any.
    pub fn cancel_trip(&mut self) {
        if let Some(handle) = self.active.take() {
            info!(route = %handle.route_id(), "trip cancelled");
            handle.cancel();
        }
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Handle of the most recently started replay.
    pub fn active_trip(&self) -> Option<&ReplayHandle> {
        self.active.as_ref()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    fn clear(&mut self) {
        self.stop_active();
        self.current = None;
        self.drawn = false;
        self.map.remove_all_routes();
    }

    fn stop_active(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }
}
