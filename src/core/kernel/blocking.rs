use crate::core::config::ConfigError;
use crate::core::errors::MailchimpError;
use crate::core::kernel::rest::TransportConfig;
use crate::core::kernel::transport::{decode_body, query_pairs, RequestOptions, Transport};
use crate::core::types::{HttpMethod, Params};
use async_trait::async_trait;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{instrument, trace, warn};
use url::Url;

/// A fully assembled request: final URL, headers and raw body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// Encode `params` into the URL or body by hand, the way a raw handle would
    pub fn new(
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
        params: Option<&Params>,
    ) -> Result<Self, MailchimpError> {
        let mut url = Url::parse(url)
            .map_err(|e| MailchimpError::InvalidParameters(format!("Invalid URL '{}': {}", url, e)))?;

        let mut headers: Vec<(String, String)> = options
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();

        let mut body = None;

        if let Some(params) = params.filter(|p| !p.is_empty()) {
            match method {
                HttpMethod::Get => {
                    url.query_pairs_mut().extend_pairs(query_pairs(params));
                }
                HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                    body = Some(serde_json::to_vec(params)?);
                    headers.push((CONTENT_TYPE.as_str().to_string(), "application/json".to_string()));
                }
                HttpMethod::Delete => {
                    warn!("Ignoring {} parameters on DELETE request", params.len());
                }
            }
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

/// Transport that opens a fresh blocking client for every exchange.
///
/// Each request is run on the blocking thread pool, mirroring a
/// one-handle-per-call socket client. Nothing is pooled between calls.
#[derive(Debug, Clone, Default)]
pub struct BlockingTransport {
    config: TransportConfig,
}

impl BlockingTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn send(config: &TransportConfig, request: PreparedRequest) -> Result<Value, MailchimpError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ConfigError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        let mut builder = client.request(request.method.into(), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(MailchimpError::connection)?;
        let status = response.status();
        let text = response.text().map_err(MailchimpError::connection)?;

        trace!("Response body: {}", text);

        if status.is_success() {
            decode_body(&text)
        } else {
            Err(MailchimpError::from_response(status.as_u16(), &text))
        }
    }
}

#[async_trait]
impl Transport for BlockingTransport {
    #[instrument(skip(self, options, params), fields(transport = "blocking", method = %method, url = %url))]
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let request = PreparedRequest::new(method, url, options, params)?;
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || Self::send(&config, request))
            .await
            .map_err(MailchimpError::connection)?
    }

    fn name(&self) -> &'static str {
        "blocking"
    }
}
