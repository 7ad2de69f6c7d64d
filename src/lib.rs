pub mod core;
pub mod resources;
pub mod utils;

pub use crate::core::client::{MailchimpClient, MailchimpClientBuilder};
pub use crate::core::config::{ClientConfig, ConfigError};
pub use crate::core::errors::MailchimpError;
pub use crate::core::kernel::{BlockingTransport, ReqwestTransport, Transport};
pub use crate::core::types::*;
pub use crate::utils::subscriber_hash;
