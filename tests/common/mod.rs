#![allow(dead_code)]

use async_trait::async_trait;
use chimpx::core::kernel::RequestOptions;
use chimpx::{ClientConfig, HttpMethod, MailchimpClient, MailchimpError, Params, Transport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One call seen by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub options: RequestOptions,
    pub params: Option<Params>,
}

/// Transport double that records every call and replays canned responses.
///
/// Responses are consumed in order; once exhausted every call answers `{}`.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<VecDeque<Result<Value, (u16, String)>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, value: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail_with(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err((status, body.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            options: options.clone(),
            params: params.cloned(),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err((status, body))) => Err(MailchimpError::from_response(status, &body)),
            None => Ok(json!({})),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("abc123-us6".to_string())
}

pub fn recording_client(transport: RecordingTransport) -> MailchimpClient<RecordingTransport> {
    MailchimpClient::<RecordingTransport>::builder(test_config())
        .build_with_transport(transport)
        .unwrap()
}

pub fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap_or_default()
}
