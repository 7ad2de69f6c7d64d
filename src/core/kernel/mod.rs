//! `chimpx` Kernel - request plumbing shared by every API resource
//!
//! The kernel contains transport and dispatch building blocks only. It knows
//! nothing about lists, campaigns or any other resource.
//!
//! # Architecture
//!
//! ## Transport Layer
//! - `Transport`: one HTTP exchange, method + URL + headers + params in, JSON out
//! - `ReqwestTransport`: pooled async `reqwest::Client`
//! - `BlockingTransport`: fresh blocking handle per request on the blocking pool
//!
//! ## Addressing
//! - `endpoint`: regional base URL from the API key's data-center suffix
//! - `path`: `{token}` substitution in path templates
//!
//! ## Batching
//! - `BatchQueue`: operations deferred into one `POST /batches` submission
//!
//! # Key Principles
//!
//! 1. **Transport Only**: no resource-specific logic lives here
//! 2. **Pluggable**: the transport is chosen at construction and injected
//! 3. **Uniform errors**: every failure surfaces as `MailchimpError`
//!
//! # Usage
//!
//! ## Default client
//! ```rust,no_run
//! use chimpx::core::client::MailchimpClient;
//! use chimpx::core::config::ClientConfig;
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("0123456789abcdef-us6".to_string());
//! let client = MailchimpClient::new(config)?;
//!
//! let account: Value = client.get_account(None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Choosing a transport
//! ```rust,no_run
//! use chimpx::core::client::MailchimpClientBuilder;
//! use chimpx::core::config::ClientConfig;
//!
//! # fn example() -> Result<(), chimpx::MailchimpError> {
//! let config = ClientConfig::new("0123456789abcdef-us6".to_string()).timeout(30);
//! let client = MailchimpClientBuilder::new(config).build_blocking()?;
//! assert_eq!(client.endpoint(), "https://us6.api.mailchimp.com/3.0");
//! # Ok(())
//! # }
//! ```
//!
//! ## Batching
//! ```rust,no_run
//! use chimpx::core::client::MailchimpClient;
//! use chimpx::core::config::ClientConfig;
//! use chimpx::core::types::HttpMethod;
//! use serde_json::{json, Value};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = MailchimpClient::new(ClientConfig::new("key-us6".to_string()))?;
//! let params = json!({"email_address": "someone@example.com", "status": "subscribed"});
//!
//! client
//!     .request::<Value>(
//!         HttpMethod::Post,
//!         "/lists/{list_id}/members",
//!         Some(&[("list_id", "57afe96172")]),
//!         params.as_object(),
//!         true,
//!     )
//!     .await?;
//!
//! let job = client.process_batch_operations().await?;
//! let _status = client.get_batch_operation(&job.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod blocking;
pub mod endpoint;
pub mod path;
pub mod rest;
pub mod transport;

// Re-export key types for convenience
pub use batch::BatchQueue;
pub use blocking::{BlockingTransport, PreparedRequest};
pub use rest::{ReqwestTransport, TransportConfig};
pub use transport::{RequestOptions, Transport};
