use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{HttpMethod, Params};
use serde_json::Value;

pub struct ConnectedSites<'a, T: Transport> {
    client: &'a MailchimpClient<T>,
}

impl<'a, T: Transport> ConnectedSites<'a, T> {
    pub(crate) fn new(client: &'a MailchimpClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_connected_sites(
        &self,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/connected-sites", None, params)
            .await
    }

    pub async fn get_connected_site(
        &self,
        connected_site_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/connected-sites/{connected_site_id}",
                Some(&[("connected_site_id", connected_site_id)]),
                params,
            )
            .await
    }
}
