//! Mock route source for running without a backend.
//!
//! Loads persisted routes from JSON files and serves them as if they came
//! from the live API.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Route, RouteId};

use super::convert::convert_route;
use super::error::ApiError;
use super::types::RouteDto;

/// Route source that serves data from JSON files.
///
/// Each `*.json` file in the directory holds one route in the backend's wire
/// format. Routes are listed in id order.
#[derive(Clone)]
pub struct MockRouteSource {
    routes: Arc<RwLock<Vec<Route>>>,
}

impl MockRouteSource {
    /// Load every route file in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let routes = load_dir(data_dir.as_ref())?;
        Ok(Self {
            routes: Arc::new(RwLock::new(routes)),
        })
    }

    /// Build directly from routes (useful in tests).
    pub fn from_routes(mut routes: Vec<Route>) -> Self {
        routes.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Self {
            routes: Arc::new(RwLock::new(routes)),
        }
    }

    /// All loaded routes.
    pub async fn list_routes(&self) -> Vec<Route> {
        self.routes.read().await.clone()
    }

    /// Route with the given id.
    pub async fn get_route(&self, id: &RouteId) -> Result<Route, ApiError> {
        let routes = self.routes.read().await;
        routes
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Reload mock data from disk.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), ApiError> {
        let fresh = load_dir(data_dir.as_ref())?;
        *self.routes.write().await = fresh;
        Ok(())
    }
}

fn load_dir(data_dir: &Path) -> Result<Vec<Route>, ApiError> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| {
        ApiError::InvalidConfig(format!(
            "failed to read mock data directory {}: {e}",
            data_dir.display()
        ))
    })?;

    let mut routes = Vec::new();

    for entry in entries {
        let entry = entry
            .map_err(|e| ApiError::InvalidConfig(format!("failed to read directory entry: {e}")))?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let json = std::fs::read_to_string(&path).map_err(|e| {
            ApiError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;

        let dto: RouteDto = serde_json::from_str(&json).map_err(|e| ApiError::Json {
            message: format!("{}: {e}", path.display()),
            body: None,
        })?;

        routes.push(convert_route(&dto)?);
    }

    if routes.is_empty() {
        return Err(ApiError::InvalidConfig(format!(
            "no mock route files found in {}",
            data_dir.display()
        )));
    }

    routes.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    Ok(routes)
}
