use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_ENDPOINT: &str = "/api/session";
pub const DEFAULT_LOGOUT_ENDPOINT: &str = "/api/logout";
pub const DEFAULT_AUTH_PATH: &str = "/auth";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_REDIRECT_DELAY_MS: u32 = 2_000;
pub const DEFAULT_SPLASH_DELAY_MS: u32 = 1_000;

/// Endpoints, redirect target and timings used by the session gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub session_endpoint: String,
    pub logout_endpoint: String,
    pub auth_path: String,
    pub request_timeout_ms: u32,
    /// Delay between a failed session check and the redirect to `auth_path`.
    pub redirect_delay_ms: u32,
    /// Extra delay after the check settles before the splash overlay is lifted.
    pub splash_delay_ms: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl GateConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            session_endpoint: DEFAULT_SESSION_ENDPOINT.to_string(),
            logout_endpoint: DEFAULT_LOGOUT_ENDPOINT.to_string(),
            auth_path: DEFAULT_AUTH_PATH.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            splash_delay_ms: DEFAULT_SPLASH_DELAY_MS,
        }
    }

    /// Parse a configuration document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Prefix both API endpoints with `base` (e.g. `http://localhost:3000`).
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        if !base.is_empty() {
            self.session_endpoint = format!("{base}{}", self.session_endpoint);
            self.logout_endpoint = format!("{base}{}", self.logout_endpoint);
        }
        self
    }
}
