//! Route resolution capability.

use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError, MockRouteSource};
use crate::domain::{Route, RouteId};

/// Resolves persisted routes.
///
/// Any error means the route cannot be shown; callers do not distinguish
/// an error payload from a transport failure.
pub trait RouteSource {
    /// Every available route.
    fn list(&self) -> impl Future<Output = Result<Vec<Route>, ApiError>> + Send;

    /// The route with the given id.
    fn get(&self, id: &RouteId) -> impl Future<Output = Result<Route, ApiError>> + Send;
}

impl RouteSource for ApiClient {
    async fn list(&self) -> Result<Vec<Route>, ApiError> {
        self.list_routes().await
    }

    async fn get(&self, id: &RouteId) -> Result<Route, ApiError> {
        self.get_route(id).await
    }
}

impl RouteSource for MockRouteSource {
    async fn list(&self) -> Result<Vec<Route>, ApiError> {
        Ok(self.list_routes().await)
    }

    async fn get(&self, id: &RouteId) -> Result<Route, ApiError> {
        self.get_route(id).await
    }
}

impl<S: RouteSource + Send + Sync> RouteSource for Arc<S> {
    async fn list(&self) -> Result<Vec<Route>, ApiError> {
        self.as_ref().list().await
    }

    async fn get(&self, id: &RouteId) -> Result<Route, ApiError> {
        self.as_ref().get(id).await
    }
}
