//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the Plaza service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "https://api.plaza.example")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Delay before the first channel reconnect attempt, in milliseconds
    pub reconnect_delay_ms: u64,

    /// Upper bound for the reconnect backoff, in milliseconds
    pub reconnect_max_delay_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            reconnect_delay_ms: 1_000,
            reconnect_max_delay_ms: 30_000,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads `PLAZA_BASE_URL` (required), `PLAZA_TOKEN`, `PLAZA_TIMEOUT_SECS`.
    /// A `.env` file is honored in development.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let base_url = std::env::var("PLAZA_BASE_URL")
            .map_err(|_| anyhow::anyhow!("PLAZA_BASE_URL is not set"))?;

        let mut config = Self::new(base_url);
        if let Ok(token) = std::env::var("PLAZA_TOKEN") {
            config.token = Some(token);
        }
        if let Ok(timeout) = std::env::var("PLAZA_TIMEOUT_SECS") {
            config.timeout = timeout.parse()?;
        }
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
