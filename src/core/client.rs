use crate::core::config::ClientConfig;
use crate::core::errors::MailchimpError;
use crate::core::kernel::batch::{BatchQueue, BATCHES_PATH, BATCH_STATUS_PATH};
use crate::core::kernel::transport::{RequestOptions, AUTHORIZATION_HEADER, TRIGGER_ERROR_HEADER};
use crate::core::kernel::{
    endpoint, path, BlockingTransport, ReqwestTransport, Transport, TransportConfig,
};
use crate::core::types::{
    BatchJob, BatchOperation, Dispatched, ErrorCode, HttpMethod, Params, PathTokens,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{instrument, warn};

const BATCH_FAILURE_PREFIX: &str = "Failed to process batch operations";

/// Builder for creating [`MailchimpClient`] instances
pub struct MailchimpClientBuilder {
    config: ClientConfig,
    user_agent: Option<String>,
}

impl MailchimpClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    fn transport_config(&self) -> TransportConfig {
        let config = TransportConfig::new(self.config.timeout_seconds);
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.clone()),
            None => config,
        }
    }

    /// Build a client on the pooled async transport
    pub fn build(self) -> Result<MailchimpClient<ReqwestTransport>, MailchimpError> {
        self.config.validate()?;
        let transport = ReqwestTransport::new(self.transport_config())?;
        self.build_with_transport(transport)
    }

    /// Build a client on the per-request blocking transport
    pub fn build_blocking(self) -> Result<MailchimpClient<BlockingTransport>, MailchimpError> {
        let transport = BlockingTransport::new(self.transport_config());
        self.build_with_transport(transport)
    }

    /// Build a client on a caller-supplied transport
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<MailchimpClient<T>, MailchimpError> {
        self.config.validate()?;

        let endpoint = self
            .config
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| endpoint::resolve(self.config.api_key()));

        Ok(MailchimpClient {
            config: self.config,
            endpoint,
            transport,
            batch: BatchQueue::new(),
        })
    }
}

/// Mailchimp Marketing API client.
///
/// Owns its endpoint, transport and pending batch operations. Methods that can
/// queue batch operations take `&mut self`.
pub struct MailchimpClient<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    endpoint: String,
    transport: T,
    batch: BatchQueue,
}

impl<T: Transport> std::fmt::Debug for MailchimpClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailchimpClient")
            .field("endpoint", &self.endpoint)
            .field("api_user", &self.config.api_user)
            .field("transport", &self.transport.name())
            .field("pending_operations", &self.batch.len())
            .finish_non_exhaustive()
    }
}

impl MailchimpClient<ReqwestTransport> {
    /// Create a client with the default transport
    pub fn new(config: ClientConfig) -> Result<Self, MailchimpError> {
        MailchimpClientBuilder::new(config).build()
    }
}

impl<T: Transport> MailchimpClient<T> {
    pub fn builder(config: ClientConfig) -> MailchimpClientBuilder {
        MailchimpClientBuilder::new(config)
    }

    /// Base URL requests are sent to, e.g. `https://us6.api.mailchimp.com/3.0`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the transport, returning the previous one
    pub fn set_transport(&mut self, transport: T) -> T {
        std::mem::replace(&mut self.transport, transport)
    }

    /// Move to a transport of a different type, keeping queued operations
    pub fn with_transport<U: Transport>(self, transport: U) -> MailchimpClient<U> {
        MailchimpClient {
            config: self.config,
            endpoint: self.endpoint,
            transport,
            batch: self.batch,
        }
    }

    /// Ask the API to fail every following request with `code`. Testing aid only.
    pub fn set_debug_error_code(&mut self, code: Option<ErrorCode>) {
        self.config.debug_error_code = code;
    }

    pub fn pending_operations(&self) -> &[BatchOperation] {
        self.batch.operations()
    }

    /// Dispatch a request, either immediately or into the batch queue.
    ///
    /// Path tokens are substituted first, so queued operations always carry the
    /// resolved path. Queued requests perform no I/O.
    pub async fn request<R: DeserializeOwned>(
        &mut self,
        method: HttpMethod,
        path: &str,
        tokens: Option<&PathTokens<'_>>,
        params: Option<&Params>,
        batch: bool,
    ) -> Result<Dispatched<R>, MailchimpError> {
        if batch {
            let path = Self::resolve_path(path, tokens);
            return self.batch.push(method, &path, params).map(Dispatched::Queued);
        }

        self.call(method, path, tokens, params)
            .await
            .map(Dispatched::Completed)
    }

    /// Send a request now and decode the response into `R`.
    ///
    /// Use `serde_json::Value` or `serde_json::Map` for a generic result, or
    /// any `DeserializeOwned` type for a typed one.
    #[instrument(skip(self, tokens, params), fields(method = %method, path = %path, transport = self.transport.name()))]
    pub async fn call<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        tokens: Option<&PathTokens<'_>>,
        params: Option<&Params>,
    ) -> Result<R, MailchimpError> {
        let path = Self::resolve_path(path, tokens);

        let unresolved = path::unresolved_tokens(&path);
        if !unresolved.is_empty() {
            warn!(?unresolved, "Request path has unresolved tokens");
        }

        let url = format!("{}{}", self.endpoint, path);
        let value = self
            .transport
            .execute(method, &url, &self.request_options(), params)
            .await?;

        serde_json::from_value(value).map_err(MailchimpError::Json)
    }

    /// Queue an operation as given; the path is stored verbatim
    pub fn enqueue(
        &mut self,
        method: &str,
        path: &str,
        params: Option<&Params>,
    ) -> Result<BatchOperation, MailchimpError> {
        self.batch.enqueue(method, path, params)
    }

    /// Submit every queued operation as one batch job.
    ///
    /// The queue is cleared as soon as the API accepts the job, even if the
    /// job description in the response cannot be decoded. When the
    /// submission itself fails the queue is left exactly as it was.
    #[instrument(skip(self), fields(operations = self.batch.len()))]
    pub async fn process_batch_operations(&mut self) -> Result<BatchJob, MailchimpError> {
        if self.batch.is_empty() {
            return Err(MailchimpError::InvalidParameters(
                "No pending batch operations to process".to_string(),
            ));
        }

        let submission = self.batch.submission()?;

        let accepted = match self
            .call::<Value>(HttpMethod::Post, BATCHES_PATH, None, Some(&submission))
            .await
        {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Batch submission failed, keeping queued operations");
                return Err(e.with_context(BATCH_FAILURE_PREFIX));
            }
        };

        // accepted server-side, so these operations must not be resubmitted
        self.batch.clear();

        serde_json::from_value(accepted).map_err(|e| {
            warn!(error = %e, "Batch accepted but the job response could not be decoded");
            MailchimpError::Json(e)
        })
    }

    /// Current state of a submitted batch job
    pub async fn get_batch_operation(&self, batch_id: &str) -> Result<BatchJob, MailchimpError> {
        self.call(
            HttpMethod::Get,
            BATCH_STATUS_PATH,
            Some(&[("batch_id", batch_id)]),
            None,
        )
        .await
    }

    /// Account information for the authenticated key
    pub async fn get_account<R: DeserializeOwned>(
        &self,
        params: Option<&Params>,
    ) -> Result<R, MailchimpError> {
        self.call(HttpMethod::Get, "/", None, params).await
    }

    /// API health check
    pub async fn ping(&self) -> Result<Value, MailchimpError> {
        self.call(HttpMethod::Get, "/ping", None, None).await
    }

    fn resolve_path(template: &str, tokens: Option<&PathTokens<'_>>) -> String {
        match tokens {
            Some(tokens) if !tokens.is_empty() => path::substitute(template, tokens),
            _ => template.to_string(),
        }
    }

    fn request_options(&self) -> RequestOptions {
        let options = RequestOptions::new().with_header(AUTHORIZATION_HEADER, self.config.authorization());

        match self.config.debug_error_code {
            Some(code) => options.with_header(TRIGGER_ERROR_HEADER, code.as_str()),
            None => options,
        }
    }
}
