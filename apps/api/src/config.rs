//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`.
//! Every variable is optional; the defaults reproduce the stock demo service listening on
//! port 8000 with the background traffic generator enabled.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: "info,sample_app=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 8000)
//! - `APP_NAME`: Name reported by the index endpoint (default: "monitoring-sample-app")
//! - `DATA_ERROR_RATE`: Failure probability of `/api/data` (default: 0.03)
//! - `TRAFFIC_ENABLED`: Run the background traffic generator (default: true)
//! - `TRAFFIC_BASE_URL`: Target of generated requests (default: "http://localhost:{PORT}")
//! - `TRAFFIC_STARTUP_DELAY_SECONDS`: Grace period before the first request (default: 10)
//! - `TRAFFIC_MIN_INTERVAL_MS`: Shortest pause between requests (default: 500)
//! - `TRAFFIC_MAX_INTERVAL_MS`: Longest pause between requests (default: 2000)
//! - `TRAFFIC_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 5)

use serde::Deserialize;

pub const DEFAULT_APP_NAME: &str = "monitoring-sample-app";
pub const DEFAULT_PORT: u16 = 8000;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Application name reported by `GET /`
    pub app_name: String,

    /// Probability in [0, 1] that `/api/data` answers with a simulated failure
    pub data_error_rate: f64,

    /// Start the background traffic generator at boot
    pub traffic_enabled: bool,

    /// Base URL the traffic generator sends requests to
    pub traffic_base_url: String,

    /// Seconds to wait before the first generated request
    pub traffic_startup_delay_seconds: u64,

    /// Lower bound of the pause between generated requests, in milliseconds
    pub traffic_min_interval_ms: u64,

    /// Upper bound of the pause between generated requests, in milliseconds
    pub traffic_max_interval_ms: u64,

    /// Timeout applied to each generated request
    pub traffic_request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            app_name: DEFAULT_APP_NAME.to_string(),
            data_error_rate: 0.03,
            traffic_enabled: true,
            traffic_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            traffic_startup_delay_seconds: 10,
            traffic_min_interval_ms: 500,
            traffic_max_interval_ms: 2000,
            traffic_request_timeout_seconds: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let port = env_or("PORT", defaults.port)?;
        let min_interval = env_or("TRAFFIC_MIN_INTERVAL_MS", defaults.traffic_min_interval_ms)?;
        let max_interval = env_or("TRAFFIC_MAX_INTERVAL_MS", defaults.traffic_max_interval_ms)?;

        Ok(Self {
            host: env_or("HOST", defaults.host)?,
            port,
            app_name: env_or("APP_NAME", defaults.app_name)?,
            data_error_rate: env_or("DATA_ERROR_RATE", defaults.data_error_rate)?.clamp(0.0, 1.0),
            traffic_enabled: env_or("TRAFFIC_ENABLED", defaults.traffic_enabled)?,
            traffic_base_url: env_or("TRAFFIC_BASE_URL", format!("http://localhost:{}", port))?,
            traffic_startup_delay_seconds: env_or(
                "TRAFFIC_STARTUP_DELAY_SECONDS",
                defaults.traffic_startup_delay_seconds,
            )?,
            traffic_min_interval_ms: min_interval.min(max_interval),
            traffic_max_interval_ms: max_interval.max(min_interval),
            traffic_request_timeout_seconds: env_or(
                "TRAFFIC_REQUEST_TIMEOUT_SECONDS",
                defaults.traffic_request_timeout_seconds,
            )?,
        })
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
