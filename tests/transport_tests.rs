use chimpx::core::client::MailchimpClientBuilder;
use chimpx::{ClientConfig, ErrorCode, HttpMethod, MailchimpClient, Transport};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new("abc123-us6".to_string()).base_url(format!("{}/3.0", server.uri()))
}

fn async_client(server: &MockServer) -> MailchimpClient {
    MailchimpClientBuilder::new(config_for(server)).build().unwrap()
}

fn blocking_client(server: &MockServer) -> MailchimpClient<chimpx::BlockingTransport> {
    MailchimpClientBuilder::new(config_for(server))
        .build_blocking()
        .unwrap()
}

fn params(value: Value) -> chimpx::Params {
    value.as_object().cloned().unwrap_or_default()
}

async fn assert_get_uses_query_string<T: Transport>(server: &MockServer, client: &MailchimpClient<T>) {
    Mock::given(method("GET"))
        .and(path("/3.0/lists/L1/members"))
        .and(query_param("count", "10"))
        .and(query_param("fields", "members.id,members.email_address"))
        .and(header("Authorization", "apikey abc123-us6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"members": []})))
        .expect(1)
        .mount(server)
        .await;

    let response: Value = client
        .call(
            HttpMethod::Get,
            "/lists/{list_id}/members",
            Some(&[("list_id", "L1")]),
            Some(&params(json!({
                "count": 10,
                "fields": ["members.id", "members.email_address"]
            }))),
        )
        .await
        .unwrap();

    assert_eq!(response, json!({"members": []}));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.last().unwrap().body.is_empty());
}

async fn assert_post_uses_json_body<T: Transport>(server: &MockServer, client: &MailchimpClient<T>) {
    Mock::given(method("POST"))
        .and(path("/3.0/lists/L1/members"))
        .and(body_json(json!({"email_address": "a@b.com", "status": "subscribed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m1"})))
        .expect(1)
        .mount(server)
        .await;

    let response: Value = client
        .call(
            HttpMethod::Post,
            "/lists/L1/members",
            None,
            Some(&params(json!({"email_address": "a@b.com", "status": "subscribed"}))),
        )
        .await
        .unwrap();

    assert_eq!(response["id"], "m1");

    let requests = server.received_requests().await.unwrap();
    assert!(requests.last().unwrap().url.query().is_none());
}

async fn assert_error_body_is_translated<T: Transport>(
    server: &MockServer,
    client: &MailchimpClient<T>,
) {
    Mock::given(method("GET"))
        .and(path("/3.0/lists/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "title": "Not Found",
            "detail": "resource missing"
        })))
        .mount(server)
        .await;

    let err = client
        .call::<Value>(HttpMethod::Get, "/lists/missing", None, None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(404));
    assert_eq!(err.message(), "404: Not Found - resource missing");
}

async fn assert_empty_error_body_uses_status_line<T: Transport>(
    server: &MockServer,
    client: &MailchimpClient<T>,
) {
    Mock::given(method("GET"))
        .and(path("/3.0/ping"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;

    let err = client.ping().await.unwrap_err();

    assert_eq!(err.code(), Some(503));
    assert_eq!(err.message(), "503 Service Unavailable");
}

#[cfg(test)]
mod reqwest_transport_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_params_are_sent_as_query() {
        let server = MockServer::start().await;
        assert_get_uses_query_string(&server, &async_client(&server)).await;
    }

    #[tokio::test]
    async fn test_post_params_are_sent_as_body() {
        let server = MockServer::start().await;
        assert_post_uses_json_body(&server, &async_client(&server)).await;
    }

    #[tokio::test]
    async fn test_error_body_is_translated() {
        let server = MockServer::start().await;
        assert_error_body_is_translated(&server, &async_client(&server)).await;
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_status_line() {
        let server = MockServer::start().await;
        assert_empty_error_body_uses_status_line(&server, &async_client(&server)).await;
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/3.0/campaigns/c1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let response: Value = async_client(&server)
            .call(HttpMethod::Delete, "/campaigns/c1", None, None)
            .await
            .unwrap();

        assert_eq!(response, Value::Null);
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_used_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = async_client(&server)
            .call::<Value>(HttpMethod::Get, "/ping", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(502));
        assert_eq!(err.message(), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_debug_error_code_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("X-Trigger-Error", "APIKeyInvalid"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": 401,
                "title": "API Key Invalid",
                "detail": "Your API key may be invalid."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = async_client(&server);
        client.set_debug_error_code(Some(ErrorCode::ApiKeyInvalid));

        let err = client.ping().await.unwrap_err();
        assert_eq!(err.code(), Some(401));
        assert_eq!(
            err.message(),
            "401: API Key Invalid - Your API key may be invalid."
        );
    }

    #[tokio::test]
    async fn test_connection_failure_has_no_code() {
        let config = ClientConfig::new("abc123-us6".to_string())
            .base_url("http://127.0.0.1:1/3.0".to_string())
            .timeout(2);
        let client = MailchimpClient::new(config).unwrap();

        let err = client.ping().await.unwrap_err();
        assert_eq!(err.code(), None);
        assert!(!err.message().is_empty());
    }
}

#[cfg(test)]
mod blocking_transport_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_params_are_sent_as_query() {
        let server = MockServer::start().await;
        assert_get_uses_query_string(&server, &blocking_client(&server)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_post_params_are_sent_as_body() {
        let server = MockServer::start().await;
        assert_post_uses_json_body(&server, &blocking_client(&server)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_body_is_translated() {
        let server = MockServer::start().await;
        assert_error_body_is_translated(&server, &blocking_client(&server)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_error_body_uses_status_line() {
        let server = MockServer::start().await;
        assert_empty_error_body_uses_status_line(&server, &blocking_client(&server)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_connection_failure_has_no_code() {
        let config = ClientConfig::new("abc123-us6".to_string())
            .base_url("http://127.0.0.1:1/3.0".to_string())
            .timeout(2);
        let client = MailchimpClientBuilder::new(config).build_blocking().unwrap();

        let err = client.ping().await.unwrap_err();
        assert_eq!(err.code(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_transport_can_be_swapped_keeping_queue() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/3.0/batches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "b1",
                "status": "pending",
                "total_operations": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = async_client(&server);
        client.enqueue("DELETE", "/campaigns/c1", None).unwrap();

        let mut client = client.with_transport(chimpx::BlockingTransport::default());
        assert_eq!(client.transport().name(), "blocking");
        assert_eq!(client.pending_operations().len(), 1);

        let job = client.process_batch_operations().await.unwrap();
        assert_eq!(job.id, "b1");
        assert_eq!(job.total_operations, 1);
    }
}
