use crate::core::config::ConfigError;
use crate::core::errors::MailchimpError;
use crate::core::kernel::transport::{decode_body, query_pairs, RequestOptions, Transport};
use crate::core::types::{HttpMethod, Params};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{instrument, trace, warn};

/// Configuration shared by the HTTP transports
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: crate::core::config::DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("chimpx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            timeout_seconds,
            ..Self::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Transport backed by a pooled async `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Build a transport with its own connection pool
    pub fn new(config: TransportConfig) -> Result<Self, MailchimpError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ConfigError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Wrap an existing client, e.g. one shared with the rest of an application
    pub fn with_client(client: Client, config: TransportConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Handle the response and extract JSON
    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, MailchimpError> {
        let status = response.status();
        let response_text = response.text().await.map_err(MailchimpError::connection)?;

        trace!("Response body: {}", response_text);

        if status.is_success() {
            decode_body(&response_text)
        } else {
            Err(MailchimpError::from_response(status.as_u16(), &response_text))
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, options, params), fields(transport = "reqwest", method = %method, url = %url))]
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let mut request = self.client.request(method.into(), url);

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(params) = params.filter(|p| !p.is_empty()) {
            match method {
                HttpMethod::Get => request = request.query(&query_pairs(params)),
                HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                    request = request.json(params);
                }
                HttpMethod::Delete => {
                    warn!("Ignoring {} parameters on DELETE request", params.len());
                }
            }
        }

        let response = request.send().await.map_err(MailchimpError::connection)?;

        self.handle_response(response).await
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
