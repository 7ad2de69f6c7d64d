use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{HttpMethod, Params};
use serde_json::Value;

pub struct Templates<'a, T: Transport> {
    client: &'a MailchimpClient<T>,
}

impl<'a, T: Transport> Templates<'a, T> {
    pub(crate) fn new(client: &'a MailchimpClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_templates(&self, params: Option<&Params>) -> Result<Value, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/templates", None, params)
            .await
    }

    pub async fn get_template(
        &self,
        template_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/templates/{template_id}",
                Some(&[("template_id", template_id)]),
                params,
            )
            .await
    }

    /// Editable sections of a template and their default content
    pub async fn get_template_content(
        &self,
        template_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/templates/{template_id}/default-content",
                Some(&[("template_id", template_id)]),
                params,
            )
            .await
    }
}
