use std::time::Duration;

use posty5_core::{
    ClientOptions, Config, ErrorKind, HttpClient, Pagination, RequestOptions, RetryPolicy,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::with_options(
        Config::new("test-key").with_base_url(&server.uri()),
        ClientOptions::default().with_retry(RetryPolicy::new(3, Duration::ZERO)),
    )
    .unwrap()
}

#[tokio::test]
async fn get_unwraps_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"a": 1}, "message": "ok"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let envelope = client.get::<Value>("/x", RequestOptions::new()).await.unwrap();
    assert_eq!(envelope.message, "ok");
    assert_eq!(envelope.require_result().unwrap(), json!({"a": 1}));
}

#[tokio::test]
async fn api_key_header_is_injected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/short-link/abc"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}, "message": ""})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .get::<Value>("/api/short-link/abc", RequestOptions::new())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn rotated_key_is_used_by_later_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-API-Key", "rotated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 1, "message": ""})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.set_api_key("rotated");
    let value = client
        .get::<i64>("/anything", RequestOptions::new())
        .await
        .unwrap()
        .require_result()
        .unwrap();
    assert_eq!(value, 1);

    client.clear_api_key();
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn query_params_and_headers_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/qr-code"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "25"))
        .and(query_param("tag", "launch"))
        .and(header("x-trace", "t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"result": {"items": [], "page": 2, "pageSize": 25}, "message": ""}),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let options = RequestOptions::new()
        .param("tag", "launch")
        .query(&Pagination::default().with_page(2).with_page_size(25))
        .header("x-trace", "t-1");
    let page = client
        .get::<posty5_core::Paginated<Value>>("/api/qr-code", options)
        .await
        .unwrap()
        .require_result()
        .unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 25);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn validation_error_carries_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/short-link"))
        .and(body_json(json!({"name": ""})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "name required",
            "exception": [{"path": ["name"], "message": "required"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .post::<Value, _>("/api/short-link", &json!({"name": ""}), RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::Validation { .. }));
    assert_eq!(err.message(), "name required");
    let fields = err.invalid_fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field(), "name");
    assert_eq!(fields[0].message, "required");
}

#[tokio::test]
async fn server_errors_are_retried_until_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "down"})))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/flaky", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(*err.kind(), ErrorKind::Server);
    assert_eq!(err.status(), Some(503));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn recovers_after_transient_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/short-link/abc"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/short-link/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok", "message": ""})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value = client
        .put::<String, _>("/api/short-link/abc", &json!({"baseUrl": "https://a.b"}), RequestOptions::new())
        .await
        .unwrap()
        .require_result()
        .unwrap();
    assert_eq!(value, "ok");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not here"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/missing", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(*err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "not here");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rate_limit_reads_retry_after_and_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/qr-code/q1"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "5")
                .set_body_json(json!({"message": "slow down"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .delete::<Value>("/api/qr-code/q1", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::RateLimit { .. }));
    assert_eq!(err.retry_after(), Some(5));
}

async fn kind_for(client: &HttpClient, status: u16) -> ErrorKind {
    client
        .patch::<Value, _>(
            &format!("/status/{}", status),
            &json!({}),
            RequestOptions::new().skip_retry(),
        )
        .await
        .unwrap_err()
        .kind()
        .clone()
}

#[tokio::test]
async fn classification_table() {
    let mock_server = MockServer::start().await;

    for status in [400u16, 401, 403, 404, 429, 500] {
        Mock::given(method("PATCH"))
            .and(path(format!("/status/{}", status)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"message": "x"})))
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    assert!(matches!(kind_for(&client, 400).await, ErrorKind::Validation { .. }));
    assert_eq!(kind_for(&client, 401).await, ErrorKind::Authentication);
    assert_eq!(kind_for(&client, 403).await, ErrorKind::Authorization);
    assert_eq!(kind_for(&client, 404).await, ErrorKind::NotFound);
    assert!(matches!(kind_for(&client, 429).await, ErrorKind::RateLimit { .. }));
    assert_eq!(kind_for(&client, 500).await, ErrorKind::Server);
}

#[tokio::test]
async fn skip_retry_makes_a_single_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/once", RequestOptions::new().skip_retry())
        .await
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "Internal Server Error");
}

#[tokio::test]
async fn per_call_timeout_is_a_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({"result": 1, "message": ""})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>(
            "/slow",
            RequestOptions::new()
                .timeout(Duration::from_millis(50))
                .skip_retry(),
        )
        .await
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Network);
    assert_eq!(err.message(), "Request timeout");
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    let client = HttpClient::with_options(
        Config::default().with_base_url("http://127.0.0.1:1"),
        ClientOptions::default().with_retry(RetryPolicy::new(2, Duration::ZERO)),
    )
    .unwrap();

    let err = client
        .get::<Value>("/api/short-link", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Network);
    assert_eq!(err.message(), "Network error: unable to connect");
    assert_eq!(err.code(), Some("NETWORK_ERROR"));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn missing_result_is_surfaced_not_asserted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "done", "isSuccess": true})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let envelope = client
        .get::<Value>("/empty", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(envelope.is_success, Some(true));
    assert!(envelope.result.is_none());

    let err = envelope.require_result().unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Generic);
    assert_eq!(err.code(), Some("MISSING_RESULT"));
}

#[tokio::test]
async fn malformed_success_body_is_generic_and_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/garbled", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Generic);
}

#[tokio::test]
async fn empty_success_body_has_no_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let envelope = client
        .delete::<Value>("/api/short-link/abc", RequestOptions::new())
        .await
        .unwrap();
    assert!(envelope.result().is_none());
}
