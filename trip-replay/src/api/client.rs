//! Route backend HTTP client.
//!
//! Provides async methods for listing and fetching persisted routes, looking
//! up places, computing directions and saving new routes.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Route, RouteId};

use super::convert::convert_route;
use super::error::ApiError;
use super::types::{
    DirectionsResponseDto, FindPlaceResponseDto, NewRoute, RouteDto, RouteResponse,
};

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparseable body to keep for diagnostics.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the backend, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Route backend client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::InvalidConfig("empty base URL".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every persisted route.
    pub async fn list_routes(&self) -> Result<Vec<Route>, ApiError> {
        let url = format!("{}/routes", self.base_url);
        debug!(%url, "listing routes");

        let response = self.http.get(&url).send().await?;
        let dtos: Vec<RouteDto> = read_json(response).await?;

        dtos.iter()
            .map(|dto| convert_route(dto).map_err(ApiError::from))
            .collect()
    }

    /// Fetch one route by id.
    ///
    /// The backend may answer `200` with an `{ message, statusCode }` body;
    /// that is reported as [`ApiError::Api`] like any other failure status.
    pub async fn get_route(&self, id: &RouteId) -> Result<Route, ApiError> {
        let url = format!("{}/routes/{}", self.base_url, id);
        debug!(%url, "fetching route");

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.to_string()));
        }

        match read_json(response).await? {
            RouteResponse::Error(payload) => Err(ApiError::Api {
                status: payload.status_code,
                message: payload.message.to_string(),
            }),
            RouteResponse::Route(dto) => Ok(convert_route(&dto)?),
        }
    }

    /// Look up places matching free text.
    ///
    /// The lookup status is returned as-is; callers decide what a non-`OK`
    /// status means.
    pub async fn find_place(&self, text: &str) -> Result<FindPlaceResponseDto, ApiError> {
        let url = format!("{}/places", self.base_url);
        debug!(%url, text, "finding place");

        let response = self.http.get(&url).query(&[("text", text)]).send().await?;
        read_json(response).await
    }

    /// Compute directions between two place ids.
    pub async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponseDto, ApiError> {
        let url = format!("{}/directions", self.base_url);
        debug!(%url, origin, destination, "fetching directions");

        let response = self
            .http
            .get(&url)
            .query(&[("origin", origin), ("destination", destination)])
            .send()
            .await?;
        read_json(response).await
    }

    /// Persist a new route and return it as stored.
    pub async fn create_route(&self, route: &NewRoute) -> Result<Route, ApiError> {
        let url = format!("{}/routes", self.base_url);
        debug!(%url, name = %route.name, "creating route");

        let response = self.http.post(&url).json(route).send().await?;
        let dto: RouteDto = read_json(response).await?;
        Ok(convert_route(&dto)?)
    }
}

/// Check the status, then parse the body as JSON.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })
}
