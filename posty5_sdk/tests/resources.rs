use std::time::Duration;

use posty5_sdk::form_submission::{ChangeStatusRequest, FormSubmissionListParams};
use posty5_sdk::html_hosting_variables::VariableRequest;
use posty5_sdk::qr_code::{QrCodeRequest, QrCodeTarget};
use posty5_sdk::short_link::{CreateShortLinkRequest, ShortLinkListParams};
use posty5_sdk::{ClientOptions, Config, ErrorKind, FormStatus, Pagination, Posty5, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client_for(server: &MockServer) -> Posty5 {
    Posty5::with_options(
        Config::new("test-key").with_base_url(&server.uri()),
        ClientOptions::default().with_retry(RetryPolicy::new(0, Duration::ZERO)),
    )
    .unwrap()
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "Success",
        "isSuccess": true,
        "result": result
    }))
}

// ============================================================================
// Short links
// ============================================================================

#[tokio::test]
async fn short_link_create_tags_template_and_origin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/short-link"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(json!({
            "baseUrl": "https://example.com/spring",
            "name": "Spring",
            "templateType": "user",
            "createdFrom": "rustPackage"
        })))
        .respond_with(ok(json!({
            "_id": "sl-1",
            "shorterLink": "https://posty5.com/s/abc",
            "shortLinkId": "abc",
            "baseUrl": "https://example.com/spring"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let link = client_for(&server)
        .short_links()
        .create(&CreateShortLinkRequest::new("https://example.com/spring").with_name("Spring"))
        .await
        .unwrap();
    assert_eq!(link.id, "sl-1");
    assert_eq!(link.shorter_link, "https://posty5.com/s/abc");
}

#[tokio::test]
async fn short_link_list_sends_filters_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/short-link"))
        .and(query_param("tag", "spring"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("short_links.json")))
        .expect(1)
        .mount(&server)
        .await;

    let params = ShortLinkListParams {
        tag: Some("spring".to_string()),
        ..Default::default()
    };
    let page = client_for(&server)
        .short_links()
        .list(&params, &Pagination::default().with_page(2))
        .await
        .unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].short_link_id, "abc123");
}

#[tokio::test]
async fn short_link_get_surfaces_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/short-link/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Short link not found",
            "isSuccess": false
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .short_links()
        .get("missing")
        .await
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Short link not found");
}

// ============================================================================
// QR codes
// ============================================================================

#[tokio::test]
async fn qr_code_create_sends_encoded_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qr-code"))
        .and(body_partial_json(json!({
            "templateId": "tpl-1",
            "qrCodeTarget": {"type": "call", "call": {"phoneNumber": "+15550100"}},
            "options": {"text": "tel:+15550100"},
            "templateType": "user",
            "createdFrom": "rustPackage"
        })))
        .respond_with(ok(json!({"_id": "qr-1", "qrCodeId": "q1"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = QrCodeRequest::new("tpl-1", QrCodeTarget::call("+15550100"));
    let qr = client_for(&server).qr_codes().create(&request).await.unwrap();
    assert_eq!(qr.id, "qr-1");
}

#[tokio::test]
async fn qr_code_update_is_a_post_to_the_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qr-code/qr-1"))
        .and(body_partial_json(json!({"options": {"text": "https://example.com"}})))
        .respond_with(ok(json!({"_id": "qr-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = QrCodeRequest::new("tpl-1", QrCodeTarget::url("https://example.com"));
    client_for(&server)
        .qr_codes()
        .update("qr-1", &request)
        .await
        .unwrap();
}

// ============================================================================
// HTML hosting variables
// ============================================================================

#[tokio::test]
async fn variable_key_without_prefix_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .html_hosting_variables()
        .create(&VariableRequest::new("Api", "api_url", "https://x"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Validation { .. }));
    assert_eq!(err.invalid_fields().len(), 1);
    assert!(err.message().contains("pst5_api_url"));
}

#[tokio::test]
async fn variable_create_adds_origin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/html-hosting-variables"))
        .and(body_partial_json(json!({
            "name": "Api",
            "key": "pst5_api_url",
            "value": "https://x",
            "createdFrom": "rustPackage"
        })))
        .respond_with(ok(json!({"_id": "var-1"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .html_hosting_variables()
        .create(&VariableRequest::new("Api", "pst5_api_url", "https://x"))
        .await
        .unwrap();
}

// ============================================================================
// Form submissions
// ============================================================================

#[tokio::test]
async fn form_submission_list_always_scopes_to_a_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/html-hosting-form-submission"))
        .and(query_param("htmlHostingId", "page-1"))
        .and(query_param("status", "Pending Review"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("form_submissions.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = FormSubmissionListParams::new("page-1").with_status(FormStatus::PendingReview);
    let page = client_for(&server)
        .form_submissions()
        .list(&params, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    let submission = &page.items[0];
    assert_eq!(submission.status, FormStatus::PendingReview);
    assert_eq!(submission.data["email"], "ada@example.com");
    assert_eq!(submission.status_history.len(), 1);
}

#[tokio::test]
async fn change_status_falls_back_to_envelope_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/html-hosting-form-submission/sub-1/status"))
        .and(body_partial_json(json!({
            "status": "Rejected",
            "rejectedReason": "duplicate"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Status updated",
            "isSuccess": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChangeStatusRequest::new(FormStatus::Rejected).with_rejected_reason("duplicate");
    let result = client_for(&server)
        .form_submissions()
        .change_status("sub-1", &request)
        .await
        .unwrap();
    assert_eq!(result.message.as_deref(), Some("Status updated"));
    assert!(result.status_history.is_empty());
}
