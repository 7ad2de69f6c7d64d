use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum MailchimpError {
    /// Any failure reported by the API or the transport. `code` is the HTTP
    /// status, or `None` when no response was received at all.
    #[error("{message}")]
    Api {
        code: Option<u16>,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}

impl MailchimpError {
    /// HTTP status of an API failure
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }

    /// Failure with no HTTP response behind it (DNS, timeout, reset)
    pub fn connection<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Api {
            code: None,
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// Failure carried by an HTTP response with a non-success status
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status_line(status)
        } else {
            synthesize_message(body).unwrap_or_else(|| body.to_string())
        };

        Self::Api {
            code: Some(status),
            message,
            source: None,
        }
    }

    /// Re-wrap with a context prefix, keeping the status code and chaining the original
    pub fn with_context(self, prefix: &str) -> Self {
        Self::Api {
            code: self.code(),
            message: format!("{}: {}", prefix, self.message()),
            source: Some(Box::new(self)),
        }
    }
}

/// Error body returned by the API on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub r#type: Option<String>,
    pub status: Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl ApiErrorBody {
    pub fn message(&self) -> String {
        let status = match &self.status {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let mut message = format!("{}: {}", status, self.title);

        if let Some(detail) = self.detail.as_deref().filter(|d| !d.is_empty()) {
            message.push_str(" - ");
            message.push_str(detail);
        }

        let has_errors = match &self.errors {
            Some(Value::Array(errors)) => !errors.is_empty(),
            Some(Value::Object(errors)) => !errors.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if has_errors {
            if let Some(errors) = &self.errors {
                message.push(' ');
                message.push_str(&errors.to_string());
            }
        }

        message
    }
}

/// `"503 Service Unavailable"`, or just the number for unregistered codes
fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}

/// Builds `"{status}: {title} - {detail} {errors}"` from a JSON error body.
/// Returns `None` when the body is not a JSON error object.
pub fn synthesize_message(body: &str) -> Option<String> {
    if !body.trim_start().starts_with('{') {
        return None;
    }

    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|error| error.message())
}
