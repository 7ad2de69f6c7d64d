use crate::core::errors::MailchimpError;
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Request parameters: query string pairs for GET, JSON body for everything else
pub type Params = Map<String, Value>;

/// Path tokens in insertion order, e.g. `[("list_id", "57afe96172")]`
pub type PathTokens<'a> = [(&'a str, &'a str)];

/// HTTP methods understood by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel as a JSON request body
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = MailchimpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "" => Err(MailchimpError::InvalidParameters(
                "HTTP method must not be empty".to_string(),
            )),
            other => Err(MailchimpError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Error codes the API can be asked to return through the `X-Trigger-Error` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    BadRequest,
    InvalidAction,
    InvalidResource,
    #[serde(rename = "JSONParseError")]
    JsonParseError,
    #[serde(rename = "APIKeyMissing")]
    ApiKeyMissing,
    #[serde(rename = "APIKeyInvalid")]
    ApiKeyInvalid,
    Forbidden,
    UserDisabled,
    WrongDatacenter,
    ResourceNotFound,
    MethodNotAllowed,
    ResourceNestingTooDeep,
    InvalidMethodOverride,
    RequestedFieldsInvalid,
    TooManyRequests,
    InternalServerError,
    ComplianceRelated,
}

impl ErrorCode {
    pub const ALL: [Self; 17] = [
        Self::BadRequest,
        Self::InvalidAction,
        Self::InvalidResource,
        Self::JsonParseError,
        Self::ApiKeyMissing,
        Self::ApiKeyInvalid,
        Self::Forbidden,
        Self::UserDisabled,
        Self::WrongDatacenter,
        Self::ResourceNotFound,
        Self::MethodNotAllowed,
        Self::ResourceNestingTooDeep,
        Self::InvalidMethodOverride,
        Self::RequestedFieldsInvalid,
        Self::TooManyRequests,
        Self::InternalServerError,
        Self::ComplianceRelated,
    ];

    /// Wire name, as sent in `X-Trigger-Error`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::InvalidAction => "InvalidAction",
            Self::InvalidResource => "InvalidResource",
            Self::JsonParseError => "JSONParseError",
            Self::ApiKeyMissing => "APIKeyMissing",
            Self::ApiKeyInvalid => "APIKeyInvalid",
            Self::Forbidden => "Forbidden",
            Self::UserDisabled => "UserDisabled",
            Self::WrongDatacenter => "WrongDatacenter",
            Self::ResourceNotFound => "ResourceNotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::ResourceNestingTooDeep => "ResourceNestingTooDeep",
            Self::InvalidMethodOverride => "InvalidMethodOverride",
            Self::RequestedFieldsInvalid => "RequestedFieldsInvalid",
            Self::TooManyRequests => "TooManyRequests",
            Self::InternalServerError => "InternalServerError",
            Self::ComplianceRelated => "ComplianceRelated",
        }
    }

    /// HTTP status the API answers with for this error
    pub const fn status(self) -> u16 {
        match self {
            Self::BadRequest
            | Self::InvalidAction
            | Self::InvalidResource
            | Self::JsonParseError => 400,
            Self::ApiKeyMissing | Self::ApiKeyInvalid => 401,
            Self::Forbidden
            | Self::UserDisabled
            | Self::WrongDatacenter
            | Self::ComplianceRelated => 403,
            Self::ResourceNotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ResourceNestingTooDeep => 414,
            Self::InvalidMethodOverride | Self::RequestedFieldsInvalid => 422,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = MailchimpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MailchimpError::InvalidParameters(format!("Unknown error code: {}", s)))
    }
}

/// A request deferred into the next batch submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOperation {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    /// JSON-encoded request body; the batch endpoint wants a string, not an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Server-side progress of a batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Pending,
    Preprocessing,
    Started,
    Finalizing,
    Finished,
    #[serde(other)]
    Unknown,
}

impl BatchStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// Batch job handle returned by `POST /batches` and `GET /batches/{batch_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    pub id: String,
    pub status: BatchStatus,
    #[serde(default)]
    pub total_operations: u64,
    #[serde(default)]
    pub finished_operations: u64,
    #[serde(default)]
    pub errored_operations: u64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Archive with the individual operation results, set once finished
    #[serde(default, deserialize_with = "empty_as_none")]
    pub response_body_url: Option<String>,
}

// The API reports unset fields as "" rather than null
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl BatchJob {
    /// Operations that completed without error so far
    pub const fn succeeded_operations(&self) -> u64 {
        self.finished_operations
            .saturating_sub(self.errored_operations)
    }
}

/// Result of a dispatch that may have been deferred into the batch queue
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched<T> {
    /// The request was sent and the response decoded
    Completed(T),
    /// The request was queued for the next batch submission
    Queued(BatchOperation),
}

impl<T> Dispatched<T> {
    pub const fn is_queued(&self) -> bool {
        matches!(self, Self::Queued(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Queued(_) => None,
        }
    }

    pub fn queued(self) -> Option<BatchOperation> {
        match self {
            Self::Completed(_) => None,
            Self::Queued(op) => Some(op),
        }
    }
}

/// Status of a list member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Subscribed,
    Unsubscribed,
    Cleaned,
    Pending,
    Transactional,
}

impl MemberStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::Cleaned => "cleaned",
            Self::Pending => "pending",
            Self::Transactional => "transactional",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
