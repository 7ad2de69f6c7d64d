use crate::core::errors::MailchimpError;
use crate::core::types::{BatchOperation, HttpMethod, Params};
use tracing::debug;

/// Endpoint that accepts batch submissions
pub const BATCHES_PATH: &str = "/batches";
/// Endpoint reporting a single batch job
pub const BATCH_STATUS_PATH: &str = "/batches/{batch_id}";

/// Operations waiting for the next batch submission.
///
/// Append-only between flushes. The client only clears it after the API has
/// accepted the submission, so a failed flush can simply be retried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchQueue {
    operations: Vec<BatchOperation>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an operation. GET parameters are kept as a `params` object; for
    /// every other method they are pre-encoded into the `body` string.
    pub fn enqueue(
        &mut self,
        method: &str,
        path: &str,
        params: Option<&Params>,
    ) -> Result<BatchOperation, MailchimpError> {
        if method.trim().is_empty() || path.trim().is_empty() {
            return Err(MailchimpError::InvalidParameters(
                "Cannot add batch operation without a method and path.".to_string(),
            ));
        }
        let method: HttpMethod = method.parse()?;

        self.push(method, path, params)
    }

    /// Typed variant of [`BatchQueue::enqueue`]
    pub fn push(
        &mut self,
        method: HttpMethod,
        path: &str,
        params: Option<&Params>,
    ) -> Result<BatchOperation, MailchimpError> {
        if path.trim().is_empty() {
            return Err(MailchimpError::InvalidParameters(
                "Cannot add batch operation without a method and path.".to_string(),
            ));
        }

        let mut operation = BatchOperation {
            method,
            path: path.to_string(),
            params: None,
            body: None,
        };

        if let Some(params) = params.filter(|p| !p.is_empty()) {
            if method == HttpMethod::Get {
                operation.params = Some(params.clone());
            } else {
                operation.body = Some(serde_json::to_string(params)?);
            }
        }

        debug!(
            method = %operation.method,
            path = %operation.path,
            queued = self.operations.len() + 1,
            "Queued batch operation"
        );
        self.operations.push(operation.clone());

        Ok(operation)
    }

    pub fn operations(&self) -> &[BatchOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Request parameters for `POST /batches`
    pub fn submission(&self) -> Result<Params, MailchimpError> {
        let mut params = Params::new();
        params.insert(
            "operations".to_string(),
            serde_json::to_value(&self.operations)?,
        );
        Ok(params)
    }

    pub(crate) fn clear(&mut self) {
        self.operations.clear();
    }
}
