//! Application configuration.
//!
//! Everything is read from environment variables with sensible defaults,
//! so the binary runs against a local backend with no setup.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::api::ApiConfig;
use crate::cache::CacheConfig;
use crate::domain::GeoPoint;
use crate::replay::schedule::DEFAULT_SCALE;

/// Backend base URL.
pub const ENV_API_URL: &str = "TRIP_REPLAY_API_URL";
/// Replay scale factor.
pub const ENV_SCALE: &str = "TRIP_REPLAY_SCALE";
/// Upper bound on one step's total wait, in seconds.
pub const ENV_MAX_STEP_WAIT_SECS: &str = "TRIP_REPLAY_MAX_STEP_WAIT_SECS";
/// Directory of route fixtures; when set, no backend is contacted.
pub const ENV_MOCK_DIR: &str = "TRIP_REPLAY_MOCK_DIR";
/// Route cache time-to-live, in seconds.
pub const ENV_CACHE_TTL_SECS: &str = "TRIP_REPLAY_CACHE_TTL_SECS";
/// Map provider API key.
pub const ENV_MAP_API_KEY: &str = "TRIP_REPLAY_MAP_API_KEY";

/// Map centre used when no geolocated position is available.
const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint::new(-22.128336370741454, -51.400940115297274);

/// Initial map zoom level.
const DEFAULT_MAP_ZOOM: u8 = 15;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Replay pacing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Scale factor applied to step durations. Any sign; zero means 1.
    pub scale: f64,

    /// Upper bound on the total wait of a single step.
    /// `None` leaves waits unbounded.
    pub max_step_wait: Option<Duration>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            max_step_wait: None,
        }
    }
}

/// Map presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// API key for the map provider, if any.
    pub api_key: Option<String>,

    /// Centre used when no current position is known.
    pub default_center: GeoPoint,

    pub zoom: u8,
}

impl MapConfig {
    /// The given position, or the default centre.
    pub fn center_or_default(&self, position: Option<GeoPoint>) -> GeoPoint {
        position.unwrap_or(self.default_center)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_center: DEFAULT_MAP_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub playback: PlaybackConfig,
    pub map: MapConfig,
    pub cache: CacheConfig,

    /// Serve routes from fixture files in this directory instead of the backend.
    pub mock_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Unset and empty variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api = config.api.with_base_url(url.trim_end_matches('/'));
        }

        if let Some(value) = get(ENV_SCALE) {
            config.playback.scale = parse(ENV_SCALE, &value)?;
        }

        if let Some(value) = get(ENV_MAX_STEP_WAIT_SECS) {
            let secs: f64 = parse(ENV_MAX_STEP_WAIT_SECS, &value)?;
            let max = Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::Invalid {
                key: ENV_MAX_STEP_WAIT_SECS,
                value: value.clone(),
            })?;
            config.playback.max_step_wait = Some(max);
        }

        if let Some(value) = get(ENV_CACHE_TTL_SECS) {
            let secs: u64 = parse(ENV_CACHE_TTL_SECS, &value)?;
            config.cache.ttl = Duration::from_secs(secs);
        }

        config.mock_dir = get(ENV_MOCK_DIR).map(PathBuf::from);
        config.map.api_key = get(ENV_MAP_API_KEY);

        if config.map.api_key.is_none() {
            warn!("{ENV_MAP_API_KEY} not set; map tiles would fail to load");
        }

        Ok(config)
    }

    /// Set the replay scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.playback.scale = scale;
        self
    }

    /// Set the per-step wait cap.
    pub fn with_max_step_wait(mut self, max: Option<Duration>) -> Self {
        self.playback.max_step_wait = max;
        self
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
