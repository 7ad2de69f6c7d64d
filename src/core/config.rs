use crate::core::types::ErrorCode;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Default API user sent in the `Authorization` header
pub const DEFAULT_API_USER: &str = "apikey";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Secret<String>,
    pub api_user: String,
    pub timeout_seconds: u64,
    pub base_url: Option<String>,
    /// Makes the API answer every request with this error. Testing aid only.
    pub debug_error_code: Option<ErrorCode>,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ClientConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ClientConfig", 5)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("api_user", &self.api_user)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("debug_error_code", &self.debug_error_code)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ClientConfigHelper {
            api_key: String,
            #[serde(default = "default_api_user")]
            api_user: String,
            #[serde(default = "default_timeout")]
            timeout_seconds: u64,
            #[serde(default)]
            base_url: Option<String>,
            #[serde(default)]
            debug_error_code: Option<ErrorCode>,
        }

        let helper = ClientConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            api_user: helper.api_user,
            timeout_seconds: helper.timeout_seconds,
            base_url: helper.base_url,
            debug_error_code: helper.debug_error_code,
        })
    }
}

fn default_api_user() -> String {
    DEFAULT_API_USER.to_string()
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ClientConfig {
    /// Create a new configuration for an API key, e.g. `0123456789abcdef-us6`
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            api_user: default_api_user(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            base_url: None,
            debug_error_code: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `MAILCHIMP_API_KEY`)
    /// - `{PREFIX}_API_USER` (optional, defaults to `apikey`)
    /// - `{PREFIX}_TIMEOUT` (optional, seconds)
    /// - `{PREFIX}_BASE_URL` (optional)
    /// - `{PREFIX}_DEBUG_ERROR_CODE` (optional, e.g. `ResourceNotFound`)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let api_user_var = format!("{}_API_USER", prefix);
        let timeout_var = format!("{}_TIMEOUT", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);
        let debug_var = format!("{}_DEBUG_ERROR_CODE", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let api_user = env::var(&api_user_var).unwrap_or_else(|_| default_api_user());

        let timeout_seconds = match env::var(&timeout_var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{}: {}", timeout_var, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        let base_url = env::var(&base_url_var).ok();

        let debug_error_code = match env::var(&debug_var) {
            Ok(raw) => Some(raw.parse::<ErrorCode>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{}: {}", debug_var, e))
            })?),
            Err(_) => None,
        };

        let config = Self {
            api_key: Secret::new(api_key),
            api_user,
            timeout_seconds,
            base_url,
            debug_error_code,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // no .env file, fall back to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Reject configurations that cannot authenticate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingCredentials("api_key".to_string()));
        }
        if self.api_user.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("api_user".to_string()));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    #[must_use]
    pub fn api_user(mut self, api_user: String) -> Self {
        self.api_user = api_user;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Override the endpoint derived from the API key
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub const fn debug_error_code(mut self, code: ErrorCode) -> Self {
        self.debug_error_code = Some(code);
        self
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// `Authorization` header value: `{api_user} {api_key}`
    pub(crate) fn authorization(&self) -> String {
        format!("{} {}", self.api_user, self.api_key.expose_secret())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Missing credentials: {0} must not be empty")]
    MissingCredentials(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
