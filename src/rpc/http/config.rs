use super::error::{HttpBackendError, HttpResult};

/// Runtime configuration describing how to reach the scoring backend.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the procedure endpoint, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every call, when the session has one.
    pub auth_token: Option<String>,
}

impl HttpConfig {
    /// Construct a configuration from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    /// Attach the session's bearer token to the configuration.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> HttpResult<Self> {
        let base_url =
            std::env::var("CAGESIDE_API_URL").map_err(|_| HttpBackendError::MissingEnvVar {
                var: "CAGESIDE_API_URL",
            })?;

        let mut config = Self::new(base_url);
        if let Ok(token) = std::env::var("CAGESIDE_API_TOKEN") {
            config = config.with_auth_token(token);
        }

        Ok(config)
    }
}
