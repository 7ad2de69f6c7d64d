use super::types::{List, ListsPage, Member, MemberTag};
use super::with_defaults;
use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{Dispatched, HttpMethod, Params};
use crate::utils::subscriber_hash;
use serde_json::{json, Value};
use tracing::instrument;

/// Audience lists and their members, segments and webhooks
pub struct Lists<'a, T: Transport> {
    client: &'a mut MailchimpClient<T>,
}

impl<'a, T: Transport> Lists<'a, T> {
    pub(crate) fn new(client: &'a mut MailchimpClient<T>) -> Self {
        Self { client }
    }

    /// All lists owned by the account
    #[instrument(skip(self, params))]
    pub async fn get_lists(&self, params: Option<&Params>) -> Result<ListsPage, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/lists", None, params)
            .await
    }

    #[instrument(skip(self, params), fields(list_id = %list_id))]
    pub async fn get_list(
        &self,
        list_id: &str,
        params: Option<&Params>,
    ) -> Result<List, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}",
                Some(&[("list_id", list_id)]),
                params,
            )
            .await
    }

    pub async fn get_interest_categories(
        &self,
        list_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/interest-categories",
                Some(&[("list_id", list_id)]),
                params,
            )
            .await
    }

    pub async fn get_interests(
        &self,
        list_id: &str,
        interest_category_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/interest-categories/{interest_category_id}/interests",
                Some(&[
                    ("list_id", list_id),
                    ("interest_category_id", interest_category_id),
                ]),
                params,
            )
            .await
    }

    pub async fn get_merge_fields(
        &self,
        list_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/merge-fields",
                Some(&[("list_id", list_id)]),
                params,
            )
            .await
    }

    /// Add a merge field, e.g. `add_merge_field(id, "Birthday", "birthday", None)`
    pub async fn add_merge_field(
        &self,
        list_id: &str,
        name: &str,
        field_type: &str,
        params: Option<Params>,
    ) -> Result<Value, MailchimpError> {
        let params = with_defaults(params, [("name", json!(name)), ("type", json!(field_type))]);

        self.client
            .call(
                HttpMethod::Post,
                "/lists/{list_id}/merge-fields",
                Some(&[("list_id", list_id)]),
                Some(&params),
            )
            .await
    }

    pub async fn get_members(
        &self,
        list_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members",
                Some(&[("list_id", list_id)]),
                params,
            )
            .await
    }

    #[instrument(skip(self, email, params), fields(list_id = %list_id))]
    pub async fn get_member_info(
        &self,
        list_id: &str,
        email: &str,
        params: Option<&Params>,
    ) -> Result<Member, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members/{subscriber_hash}",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                params,
            )
            .await
    }

    pub async fn get_member_activity(
        &self,
        list_id: &str,
        email: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members/{subscriber_hash}/activity",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                params,
            )
            .await
    }

    pub async fn get_member_tags(
        &self,
        list_id: &str,
        email: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members/{subscriber_hash}/tags",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                params,
            )
            .await
    }

    /// Add (`Active`) or remove (`Inactive`) tags on a member
    pub async fn add_member_tags(
        &self,
        list_id: &str,
        email: &str,
        tags: &[MemberTag],
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        let params = with_defaults(None, [("tags", serde_json::to_value(tags)?)]);

        self.client
            .call(
                HttpMethod::Post,
                "/lists/{list_id}/members/{subscriber_hash}/tags",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                Some(&params),
            )
            .await
    }

    pub async fn get_member_notes(
        &self,
        list_id: &str,
        email: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members/{subscriber_hash}/notes",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                params,
            )
            .await
    }

    pub async fn add_member_note(
        &self,
        list_id: &str,
        email: &str,
        params: &Params,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Post,
                "/lists/{list_id}/members/{subscriber_hash}/notes",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                Some(params),
            )
            .await
    }

    pub async fn delete_member_note(
        &self,
        list_id: &str,
        email: &str,
        note_id: &str,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Delete,
                "/lists/{list_id}/members/{subscriber_hash}/notes/{note_id}",
                Some(&[
                    ("list_id", list_id),
                    ("subscriber_hash", hash.as_str()),
                    ("note_id", note_id),
                ]),
                None,
            )
            .await
    }

    #[instrument(skip(self, email, params), fields(list_id = %list_id))]
    pub async fn add_member(
        &mut self,
        list_id: &str,
        email: &str,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(params, [("email_address", json!(email))]);

        self.client
            .request(
                HttpMethod::Post,
                "/lists/{list_id}/members",
                Some(&[("list_id", list_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn remove_member(&self, list_id: &str, email: &str) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Delete,
                "/lists/{list_id}/members/{subscriber_hash}",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                None,
            )
            .await
    }

    pub async fn update_member(
        &mut self,
        list_id: &str,
        email: &str,
        params: Option<&Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .request(
                HttpMethod::Patch,
                "/lists/{list_id}/members/{subscriber_hash}",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                params,
                batch,
            )
            .await
    }

    #[instrument(skip(self, email, params), fields(list_id = %list_id))]
    pub async fn add_or_update_member(
        &mut self,
        list_id: &str,
        email: &str,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let hash = subscriber_hash(email);
        let params = with_defaults(params, [("email_address", json!(email))]);

        self.client
            .request(
                HttpMethod::Put,
                "/lists/{list_id}/members/{subscriber_hash}",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn get_segments(
        &self,
        list_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/segments",
                Some(&[("list_id", list_id)]),
                params,
            )
            .await
    }

    pub async fn get_segment(
        &self,
        list_id: &str,
        segment_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/segments/{segment_id}",
                Some(&[("list_id", list_id), ("segment_id", segment_id)]),
                params,
            )
            .await
    }

    pub async fn add_segment(
        &mut self,
        list_id: &str,
        name: &str,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(params, [("name", json!(name))]);

        self.client
            .request(
                HttpMethod::Post,
                "/lists/{list_id}/segments",
                Some(&[("list_id", list_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn update_segment(
        &mut self,
        list_id: &str,
        segment_id: &str,
        name: &str,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(params, [("name", json!(name))]);

        self.client
            .request(
                HttpMethod::Patch,
                "/lists/{list_id}/segments/{segment_id}",
                Some(&[("list_id", list_id), ("segment_id", segment_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn get_segment_members(
        &self,
        list_id: &str,
        segment_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/segments/{segment_id}/members",
                Some(&[("list_id", list_id), ("segment_id", segment_id)]),
                params,
            )
            .await
    }

    pub async fn get_webhooks(
        &self,
        list_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/webhooks",
                Some(&[("list_id", list_id)]),
                params,
            )
            .await
    }

    pub async fn get_webhook(
        &self,
        list_id: &str,
        webhook_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/webhooks/{webhook_id}",
                Some(&[("list_id", list_id), ("webhook_id", webhook_id)]),
                params,
            )
            .await
    }

    pub async fn add_webhook(
        &mut self,
        list_id: &str,
        url: &str,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(params, [("url", json!(url))]);

        self.client
            .request(
                HttpMethod::Post,
                "/lists/{list_id}/webhooks",
                Some(&[("list_id", list_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn delete_webhook(
        &self,
        list_id: &str,
        webhook_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/lists/{list_id}/webhooks/{webhook_id}",
                Some(&[("list_id", list_id), ("webhook_id", webhook_id)]),
                None,
            )
            .await
    }

    /// Look a member up by the `unique_email_id` Mailchimp puts in campaign links
    pub async fn get_member_info_by_id(
        &self,
        list_id: &str,
        unique_email_id: &str,
        params: Option<Params>,
    ) -> Result<Value, MailchimpError> {
        let params = with_defaults(params, [("unique_email_id", json!(unique_email_id))]);

        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members",
                Some(&[("list_id", list_id)]),
                Some(&params),
            )
            .await
    }

    pub async fn get_member_goals(
        &self,
        list_id: &str,
        email: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members/{subscriber_hash}/goals",
                Some(&[("list_id", list_id), ("subscriber_hash", hash.as_str())]),
                params,
            )
            .await
    }

    pub async fn get_member_note(
        &self,
        list_id: &str,
        email: &str,
        note_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Get,
                "/lists/{list_id}/members/{subscriber_hash}/notes/{note_id}",
                Some(&[
                    ("list_id", list_id),
                    ("subscriber_hash", hash.as_str()),
                    ("note_id", note_id),
                ]),
                params,
            )
            .await
    }

    pub async fn update_member_note(
        &self,
        list_id: &str,
        email: &str,
        note_id: &str,
        params: &Params,
    ) -> Result<Value, MailchimpError> {
        let hash = subscriber_hash(email);
        self.client
            .call(
                HttpMethod::Patch,
                "/lists/{list_id}/members/{subscriber_hash}/notes/{note_id}",
                Some(&[
                    ("list_id", list_id),
                    ("subscriber_hash", hash.as_str()),
                    ("note_id", note_id),
                ]),
                Some(params),
            )
            .await
    }

    /// Add an address to a static segment
    pub async fn add_segment_member(
        &self,
        list_id: &str,
        segment_id: &str,
        email: &str,
        params: Option<Params>,
    ) -> Result<Value, MailchimpError> {
        let params = with_defaults(params, [("email_address", json!(email))]);

        self.client
            .call(
                HttpMethod::Post,
                "/lists/{list_id}/segments/{segment_id}/members",
                Some(&[("list_id", list_id), ("segment_id", segment_id)]),
                Some(&params),
            )
            .await
    }

    /// Lists the address is a member of. A 404 on a list means "not a member";
    /// any other error is returned.
    #[instrument(skip(self, email))]
    pub async fn get_lists_for_email(&self, email: &str) -> Result<Vec<List>, MailchimpError> {
        let page = self.get_lists(None).await?;
        let mut subscribed = Vec::new();

        for list in page.lists {
            match self.get_member_info(&list.id, email, None).await {
                Ok(_) => subscribed.push(list),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        Ok(subscribed)
    }
}
