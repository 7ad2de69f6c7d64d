mod common;

use chimpx::resources::{MemberTag, SendType};
use chimpx::{subscriber_hash, HttpMethod, MailchimpError, MemberStatus};
use chrono::{TimeZone, Utc};
use common::{params, recording_client, RecordingTransport};
use serde_json::json;

const BASE: &str = "https://us6.api.mailchimp.com/3.0";

#[cfg(test)]
mod lists_tests {
    use super::*;

    #[tokio::test]
    async fn test_member_info_uses_subscriber_hash() {
        let transport = RecordingTransport::new().respond_with(json!({
            "id": "55502f40dc8b7c769880b10874abc9d0",
            "email_address": "test@example.com",
            "status": "subscribed",
            "list_id": "L1"
        }));
        let mut client = recording_client(transport.clone());

        let member = client
            .lists()
            .get_member_info("L1", "Test@Example.com", None)
            .await
            .unwrap();

        assert_eq!(member.status, Some(MemberStatus::Subscribed));
        assert_eq!(
            transport.calls()[0].url,
            format!("{}/lists/L1/members/55502f40dc8b7c769880b10874abc9d0", BASE)
        );
    }

    #[tokio::test]
    async fn test_add_member_merges_email_without_overriding() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .lists()
            .add_member(
                "L1",
                "a@b.com",
                Some(params(json!({"status": "pending"}))),
                false,
            )
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.url, format!("{}/lists/L1/members", BASE));
        assert_eq!(
            call.params.clone().unwrap(),
            params(json!({"status": "pending", "email_address": "a@b.com"}))
        );
    }

    #[tokio::test]
    async fn test_batched_add_or_update_member_is_queued() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        let op = client
            .lists()
            .add_or_update_member("L1", "a@b.com", None, true)
            .await
            .unwrap()
            .queued()
            .unwrap();

        assert_eq!(op.method, HttpMethod::Put);
        assert_eq!(
            op.path,
            format!("/lists/L1/members/{}", subscriber_hash("a@b.com"))
        );
        assert_eq!(op.body.as_deref(), Some(r#"{"email_address":"a@b.com"}"#));
        assert!(transport.calls().is_empty());
        assert_eq!(client.pending_operations().len(), 1);
    }

    #[tokio::test]
    async fn test_add_member_tags_body() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .lists()
            .add_member_tags(
                "L1",
                "a@b.com",
                &[MemberTag::active("vip"), MemberTag::inactive("trial")],
            )
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert!(call.url.ends_with("/tags"));
        assert_eq!(
            call.params.clone().unwrap()["tags"],
            json!([
                {"name": "vip", "status": "active"},
                {"name": "trial", "status": "inactive"}
            ])
        );
    }

    #[tokio::test]
    async fn test_lists_for_email_skips_not_found() {
        let not_found = json!({"status": 404, "title": "Resource Not Found", "detail": ""});
        let transport = RecordingTransport::new()
            .respond_with(json!({
                "lists": [{"id": "L1", "name": "One"}, {"id": "L2", "name": "Two"}],
                "total_items": 2
            }))
            .fail_with(404, not_found)
            .respond_with(json!({"id": "h", "email_address": "a@b.com"}));
        let mut client = recording_client(transport.clone());

        let lists = client.lists().get_lists_for_email("a@b.com").await.unwrap();

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, "L2");
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_lists_for_email_propagates_other_errors() {
        let transport = RecordingTransport::new()
            .respond_with(json!({"lists": [{"id": "L1", "name": "One"}], "total_items": 1}))
            .fail_with(500, json!({"status": 500, "title": "Internal Server Error"}));
        let mut client = recording_client(transport);

        let err = client
            .lists()
            .get_lists_for_email("a@b.com")
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(500));
    }

    #[tokio::test]
    async fn test_delete_member_note_path() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .lists()
            .delete_member_note("L1", "a@b.com", "n9")
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(
            call.url,
            format!(
                "{}/lists/L1/members/{}/notes/n9",
                BASE,
                subscriber_hash("a@b.com")
            )
        );
    }

    #[tokio::test]
    async fn test_member_info_by_id_keeps_caller_params() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .lists()
            .get_member_info_by_id(
                "L1",
                "u-42",
                Some(params(json!({"fields": "members.id"}))),
            )
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.url, format!("{}/lists/L1/members", BASE));
        assert_eq!(
            call.params.clone().unwrap(),
            params(json!({"fields": "members.id", "unique_email_id": "u-42"}))
        );
    }

    #[tokio::test]
    async fn test_member_goals_and_notes_paths() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());
        let member = format!("{}/lists/L1/members/{}", BASE, subscriber_hash("a@b.com"));

        client
            .lists()
            .get_member_goals("L1", "a@b.com", None)
            .await
            .unwrap();
        client
            .lists()
            .get_member_note("L1", "a@b.com", "n9", None)
            .await
            .unwrap();
        client
            .lists()
            .update_member_note(
                "L1",
                "a@b.com",
                "n9",
                &params(json!({"note": "called back"})),
            )
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].url, format!("{}/goals", member));
        assert_eq!(calls[1].method, HttpMethod::Get);
        assert_eq!(calls[1].url, format!("{}/notes/n9", member));
        assert_eq!(calls[2].method, HttpMethod::Patch);
        assert_eq!(calls[2].url, format!("{}/notes/n9", member));
        assert_eq!(
            calls[2].params.clone().unwrap(),
            params(json!({"note": "called back"}))
        );
    }

    #[tokio::test]
    async fn test_add_segment_member_posts_email() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .lists()
            .add_segment_member("L1", "s7", "a@b.com", None)
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.url, format!("{}/lists/L1/segments/s7/members", BASE));
        assert_eq!(
            call.params.clone().unwrap(),
            params(json!({"email_address": "a@b.com"}))
        );
    }
}

#[cfg(test)]
mod campaigns_tests {
    use super::*;

    #[tokio::test]
    async fn test_add_campaign_defaults() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .campaigns()
            .add_campaign(
                "regular",
                json!({"list_id": "L1"}),
                json!({"subject_line": "Hello"}),
                None,
                false,
            )
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.url, format!("{}/campaigns", BASE));
        assert_eq!(
            call.params.clone().unwrap(),
            params(json!({
                "type": "regular",
                "recipients": {"list_id": "L1"},
                "settings": {"subject_line": "Hello"}
            }))
        );
    }

    #[tokio::test]
    async fn test_schedule_formats_time_as_utc() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());
        let when = Utc.with_ymd_and_hms(2026, 11, 2, 14, 15, 0).unwrap();

        client
            .campaigns()
            .schedule("c1", when, false, None, None, false)
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.url, format!("{}/campaigns/c1/actions/schedule", BASE));
        let body = call.params.clone().unwrap();
        assert_eq!(body["schedule_time"], "2026-11-02T14:15:00Z");
        assert_eq!(body["timewarp"], false);
        assert_eq!(body["batch_delivery"], false);
    }

    #[tokio::test]
    async fn test_send_test_and_batched_send() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .campaigns()
            .send_test("c1", &["qa@example.com"], SendType::Html, None, false)
            .await
            .unwrap();
        let queued = client.campaigns().send("c1", true).await.unwrap();

        assert!(queued.is_queued());
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].params.clone().unwrap(),
            params(json!({"test_emails": ["qa@example.com"], "send_type": "html"}))
        );
        assert_eq!(
            client.pending_operations()[0].path,
            "/campaigns/c1/actions/send"
        );
    }
}

#[cfg(test)]
mod read_only_resources_tests {
    use super::*;

    #[tokio::test]
    async fn test_resource_paths() {
        let transport = RecordingTransport::new();
        let client = recording_client(transport.clone());

        client.reports().get_campaign_report("c1", "open-details", None).await.unwrap();
        client.templates().get_template_content("t1", None).await.unwrap();
        client.connected_sites().get_connected_site("s1", None).await.unwrap();
        client
            .automations()
            .get_workflow_email_subscriber("w1", "e1", "A@B.com")
            .await
            .unwrap();
        client
            .automations()
            .add_workflow_email_subscriber("w1", "e1", "a@b.com", None)
            .await
            .unwrap();

        let urls: Vec<String> = transport.calls().into_iter().map(|c| c.url).collect();
        assert_eq!(
            urls,
            vec![
                format!("{}/reports/c1/open-details", BASE),
                format!("{}/templates/t1/default-content", BASE),
                format!("{}/connected-sites/s1", BASE),
                format!(
                    "{}/automations/w1/emails/e1/queue/{}",
                    BASE,
                    subscriber_hash("a@b.com")
                ),
                format!("{}/automations/w1/emails/e1/queue", BASE),
            ]
        );
        assert_eq!(
            transport.calls()[4].params.clone().unwrap(),
            params(json!({"email_address": "a@b.com"}))
        );
    }
}

#[cfg(test)]
mod ecommerce_tests {
    use super::*;

    #[tokio::test]
    async fn test_batched_add_store_puts_id_first() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        let op = client
            .ecommerce()
            .add_store(
                "S1",
                params(json!({"id": "ignored", "name": "Shop", "currency_code": "EUR"})),
                None,
                true,
            )
            .await
            .unwrap()
            .queued()
            .unwrap();

        assert_eq!(op.method, HttpMethod::Post);
        assert_eq!(op.path, "/ecommerce/stores");
        assert_eq!(
            op.body.as_deref(),
            Some(r#"{"id":"S1","name":"Shop","currency_code":"EUR"}"#)
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_cart_nests_customer() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .ecommerce()
            .add_cart(
                "S1",
                "cart-1",
                params(json!({"id": "cust-1"})),
                params(json!({"currency_code": "USD", "order_total": 12.5, "lines": []})),
                false,
            )
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.url, format!("{}/ecommerce/stores/S1/carts", BASE));
        assert_eq!(
            call.params.clone().unwrap(),
            params(json!({
                "id": "cart-1",
                "customer": {"id": "cust-1"},
                "currency_code": "USD",
                "order_total": 12.5,
                "lines": []
            }))
        );
    }

    #[tokio::test]
    async fn test_update_customer_is_addressed_by_its_id() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .ecommerce()
            .update_customer(
                "S1",
                &params(json!({"id": "cust-1", "opt_in_status": true})),
                false,
            )
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, HttpMethod::Patch);
        assert_eq!(
            call.url,
            format!("{}/ecommerce/stores/S1/customers/cust-1", BASE)
        );

        let err = client
            .ecommerce()
            .update_customer("S1", &params(json!({"opt_in_status": true})), true)
            .await
            .unwrap_err();
        assert!(matches!(err, MailchimpError::InvalidParameters(_)));
        assert!(client.pending_operations().is_empty());
    }

    #[tokio::test]
    async fn test_batched_order_is_queued_with_substituted_path() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .ecommerce()
            .add_order(
                "S1",
                "order-1",
                params(json!({"id": "cust-1"})),
                params(json!({"currency_code": "USD", "order_total": 20, "lines": []})),
                true,
            )
            .await
            .unwrap();
        client
            .ecommerce()
            .update_order(
                "S1",
                "order-1",
                Some(&params(json!({"financial_status": "paid"}))),
                true,
            )
            .await
            .unwrap();

        let pending = client.pending_operations();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].method, HttpMethod::Post);
        assert_eq!(pending[0].path, "/ecommerce/stores/S1/orders");
        assert_eq!(pending[1].method, HttpMethod::Patch);
        assert_eq!(pending[1].path, "/ecommerce/stores/S1/orders/order-1");
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_product_and_promotion_paths() {
        let transport = RecordingTransport::new();
        let mut client = recording_client(transport.clone());

        client
            .ecommerce()
            .add_product(
                "S1",
                "p1",
                "Mug",
                "https://shop.test/mug",
                vec![json!({"id": "v1", "title": "Blue"})],
                None,
            )
            .await
            .unwrap();
        client
            .ecommerce()
            .delete_product_variant("S1", "p1", "v1")
            .await
            .unwrap();
        client
            .ecommerce()
            .update_promo_code(
                "S1",
                "r1",
                &params(json!({"id": "code-1", "enabled": false})),
                false,
            )
            .await
            .unwrap();
        client
            .ecommerce()
            .get_order_lines("S1", "order-1", None)
            .await
            .unwrap();

        let calls = transport.calls();
        let urls: Vec<String> = calls.iter().map(|c| c.url.clone()).collect();
        assert_eq!(
            urls,
            vec![
                format!("{}/ecommerce/stores/S1/products", BASE),
                format!("{}/ecommerce/stores/S1/products/p1/variants/v1", BASE),
                format!(
                    "{}/ecommerce/stores/S1/promo-rules/r1/promo-codes/code-1",
                    BASE
                ),
                format!("{}/ecommerce/stores/S1/orders/order-1/lines", BASE),
            ]
        );
        assert_eq!(
            calls[0].params.clone().unwrap(),
            params(json!({
                "id": "p1",
                "title": "Mug",
                "url": "https://shop.test/mug",
                "variants": [{"id": "v1", "title": "Blue"}]
            }))
        );
        assert_eq!(calls[1].method, HttpMethod::Delete);
    }
}
