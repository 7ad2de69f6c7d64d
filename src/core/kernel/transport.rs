use crate::core::errors::MailchimpError;
use crate::core::types::{HttpMethod, Params};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TRIGGER_ERROR_HEADER: &str = "X-Trigger-Error";

/// Per-request options assembled by the dispatcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Headers sent verbatim
    pub headers: HashMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Transport trait performing a single HTTP exchange
///
/// Implementations place `params` by method: query string for GET, JSON body
/// for POST/PUT/PATCH, nothing for DELETE. A non-success response becomes
/// [`MailchimpError::Api`] carrying the HTTP status and the synthesized error
/// message; a failure with no response at all carries no status.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the decoded JSON body (`Value::Null` when empty)
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `url` - Absolute request URL
    /// * `options` - Headers to send
    /// * `params` - Optional request parameters
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Flatten parameters into query pairs. Arrays become comma-separated lists.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), query_value(value)))
        .collect()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Decode a success body; empty bodies (204 No Content) decode to `null`
pub fn decode_body(body: &str) -> Result<Value, MailchimpError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(MailchimpError::Json)
}
