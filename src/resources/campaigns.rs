use super::types::SendType;
use super::with_defaults;
use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{Dispatched, HttpMethod, Params};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::instrument;

/// Campaign creation, content and delivery
pub struct Campaigns<'a, T: Transport> {
    client: &'a mut MailchimpClient<T>,
}

impl<'a, T: Transport> Campaigns<'a, T> {
    pub(crate) fn new(client: &'a mut MailchimpClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_campaigns(&self, params: Option<&Params>) -> Result<Value, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/campaigns", None, params)
            .await
    }

    pub async fn get_campaign(
        &self,
        campaign_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/campaigns/{campaign_id}",
                Some(&[("campaign_id", campaign_id)]),
                params,
            )
            .await
    }

    /// Create a campaign. `campaign_type` is one of `regular`, `plaintext`,
    /// `absplit`, `rss` or `variate`.
    #[instrument(skip(self, recipients, settings, params))]
    pub async fn add_campaign(
        &mut self,
        campaign_type: &str,
        recipients: Value,
        settings: Value,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            params,
            [
                ("type", json!(campaign_type)),
                ("recipients", recipients),
                ("settings", settings),
            ],
        );

        self.client
            .request(HttpMethod::Post, "/campaigns", None, Some(&params), batch)
            .await
    }

    #[instrument(skip(self, recipients, settings, params), fields(campaign_id = %campaign_id))]
    pub async fn update_campaign(
        &mut self,
        campaign_id: &str,
        campaign_type: &str,
        recipients: Value,
        settings: Value,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            params,
            [
                ("type", json!(campaign_type)),
                ("recipients", recipients),
                ("settings", settings),
            ],
        );

        self.client
            .request(
                HttpMethod::Patch,
                "/campaigns/{campaign_id}",
                Some(&[("campaign_id", campaign_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn get_campaign_content(
        &self,
        campaign_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/campaigns/{campaign_id}/content",
                Some(&[("campaign_id", campaign_id)]),
                params,
            )
            .await
    }

    pub async fn set_campaign_content(
        &self,
        campaign_id: &str,
        params: &Params,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Put,
                "/campaigns/{campaign_id}/content",
                Some(&[("campaign_id", campaign_id)]),
                Some(params),
            )
            .await
    }

    /// Review whether the campaign is ready to send
    pub async fn get_send_checklist(&self, campaign_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/campaigns/{campaign_id}/send-checklist",
                Some(&[("campaign_id", campaign_id)]),
                None,
            )
            .await
    }

    pub async fn send_test(
        &mut self,
        campaign_id: &str,
        test_emails: &[&str],
        send_type: SendType,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            params,
            [
                ("test_emails", json!(test_emails)),
                ("send_type", json!(send_type)),
            ],
        );

        self.client
            .request(
                HttpMethod::Post,
                "/campaigns/{campaign_id}/actions/test",
                Some(&[("campaign_id", campaign_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    /// Schedule delivery. The API only accepts times on a quarter hour.
    #[instrument(skip(self, params), fields(campaign_id = %campaign_id, schedule_time = %schedule_time))]
    pub async fn schedule(
        &mut self,
        campaign_id: &str,
        schedule_time: DateTime<Utc>,
        timewarp: bool,
        batch_delivery: Option<Value>,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            params,
            [
                (
                    "schedule_time",
                    json!(schedule_time.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ),
                ("timewarp", json!(timewarp)),
                ("batch_delivery", batch_delivery.unwrap_or(Value::Bool(false))),
            ],
        );

        self.client
            .request(
                HttpMethod::Post,
                "/campaigns/{campaign_id}/actions/schedule",
                Some(&[("campaign_id", campaign_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn unschedule(&self, campaign_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Post,
                "/campaigns/{campaign_id}/actions/unschedule",
                Some(&[("campaign_id", campaign_id)]),
                None,
            )
            .await
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    pub async fn send(
        &mut self,
        campaign_id: &str,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        self.client
            .request(
                HttpMethod::Post,
                "/campaigns/{campaign_id}/actions/send",
                Some(&[("campaign_id", campaign_id)]),
                None,
                batch,
            )
            .await
    }

    pub async fn delete(&self, campaign_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/campaigns/{campaign_id}",
                Some(&[("campaign_id", campaign_id)]),
                None,
            )
            .await
    }
}
