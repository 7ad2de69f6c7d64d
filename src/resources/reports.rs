use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{HttpMethod, Params};
use serde_json::Value;

pub struct Reports<'a, T: Transport> {
    client: &'a MailchimpClient<T>,
}

impl<'a, T: Transport> Reports<'a, T> {
    pub(crate) fn new(client: &'a MailchimpClient<T>) -> Self {
        Self { client }
    }

    /// Reports for every sent campaign
    pub async fn get_summary(&self, params: Option<&Params>) -> Result<Value, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/reports", None, params)
            .await
    }

    pub async fn get_campaign_summary(
        &self,
        campaign_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/reports/{campaign_id}",
                Some(&[("campaign_id", campaign_id)]),
                params,
            )
            .await
    }

    /// A sub-report of a campaign, e.g. `open-details`, `click-details`,
    /// `unsubscribed` or `email-activity`
    pub async fn get_campaign_report(
        &self,
        campaign_id: &str,
        report_type: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/reports/{campaign_id}/{type}",
                Some(&[("campaign_id", campaign_id), ("type", report_type)]),
                params,
            )
            .await
    }
}
