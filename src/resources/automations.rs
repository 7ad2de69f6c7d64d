use super::with_defaults;
use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{HttpMethod, Params};
use crate::utils::subscriber_hash;
use serde_json::{json, Value};

/// Automation workflows and their email queues
pub struct Automations<'a, T: Transport> {
    client: &'a MailchimpClient<T>,
}

impl<'a, T: Transport> Automations<'a, T> {
    pub(crate) fn new(client: &'a MailchimpClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_automations(&self, params: Option<&Params>) -> Result<Value, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/automations", None, params)
            .await
    }

    pub async fn get_workflow(&self, workflow_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/automations/{workflow_id}",
                Some(&[("workflow_id", workflow_id)]),
                None,
            )
            .await
    }

    pub async fn get_workflow_emails(&self, workflow_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/automations/{workflow_id}/emails",
                Some(&[("workflow_id", workflow_id)]),
                None,
            )
            .await
    }

    pub async fn get_workflow_email(
        &self,
        workflow_id: &str,
        workflow_email_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/automations/{workflow_id}/emails/{workflow_email_id}",
                Some(&[
                    ("workflow_id", workflow_id),
                    ("workflow_email_id", workflow_email_id),
                ]),
                None,
            )
            .await
    }

    /// Subscribers queued for a workflow email
    pub async fn get_workflow_email_subscribers(
        &self,
        workflow_id: &str,
        workflow_email_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/automations/{workflow_id}/emails/{workflow_email_id}/queue",
                Some(&[
                    ("workflow_id", workflow_id),
                    ("workflow_email_id", workflow_email_id),
                ]),
                None,
            )
            .await
    }

    pub async fn get_workflow_email_subscriber(
        &self,
        workflow_id: &str,
        workflow_email_id: &str,
        email: &str,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/automations/{workflow_id}/emails/{workflow_email_id}/queue/{subscriber_hash}",
                Some(&[
                    ("workflow_id", workflow_id),
                    ("workflow_email_id", workflow_email_id),
                    ("subscriber_hash", hash.as_str()),
                ]),
                None,
            )
            .await
    }

    /// Manually add a subscriber to a workflow email queue
    pub async fn add_workflow_email_subscriber(
        &self,
        workflow_id: &str,
        workflow_email_id: &str,
        email: &str,
        params: Option<Params>,
    ) -> Result<Value, MailchimpError> {
        let params = with_defaults(params, [("email_address", json!(email))]);

        self.client
            .call(
                HttpMethod::Post,
                "/automations/{workflow_id}/emails/{workflow_email_id}/queue",
                Some(&[
                    ("workflow_id", workflow_id),
                    ("workflow_email_id", workflow_email_id),
                ]),
                Some(&params),
            )
            .await
    }
}
