//! Thin per-resource wrappers. Each method maps one typed call onto
//! [`MailchimpClient::request`] or [`MailchimpClient::call`].

pub mod automations;
pub mod campaigns;
pub mod connected_sites;
pub mod ecommerce;
pub mod lists;
pub mod reports;
pub mod templates;
pub mod types;

use crate::core::client::MailchimpClient;
use crate::core::kernel::Transport;
use crate::core::types::Params;
use serde_json::Value;

pub use automations::Automations;
pub use campaigns::Campaigns;
pub use connected_sites::ConnectedSites;
pub use ecommerce::Ecommerce;
pub use lists::Lists;
pub use reports::Reports;
pub use templates::Templates;
pub use types::{Account, List, ListsPage, Member, MemberTag, SendType, TagStatus};

impl<T: Transport> MailchimpClient<T> {
    pub fn lists(&mut self) -> Lists<'_, T> {
        Lists::new(self)
    }

    pub fn campaigns(&mut self) -> Campaigns<'_, T> {
        Campaigns::new(self)
    }

    pub fn ecommerce(&mut self) -> Ecommerce<'_, T> {
        Ecommerce::new(self)
    }

    pub fn automations(&self) -> Automations<'_, T> {
        Automations::new(self)
    }

    pub fn reports(&self) -> Reports<'_, T> {
        Reports::new(self)
    }

    pub fn templates(&self) -> Templates<'_, T> {
        Templates::new(self)
    }

    pub fn connected_sites(&self) -> ConnectedSites<'_, T> {
        ConnectedSites::new(self)
    }
}

/// Fill in required fields without overriding values the caller already set
pub(crate) fn with_defaults<const N: usize>(
    params: Option<Params>,
    defaults: [(&str, Value); N],
) -> Params {
    let mut params = params.unwrap_or_default();
    for (key, value) in defaults {
        params.entry(key.to_string()).or_insert(value);
    }
    params
}

/// Merge `extra` under `params`; keys already in `params` are kept
pub(crate) fn merge_missing(mut params: Params, extra: Params) -> Params {
    for (key, value) in extra {
        params.entry(key).or_insert(value);
    }
    params
}
