use payments_webhook::error::WebhookError;
use payments_webhook::gateways::http::HttpPaymentVerifier;
use payments_webhook::gateways::mock::MockPaymentVerifier;
use payments_webhook::gateways::{
    is_accepted_status, status_from_body, PaymentVerifier, ProviderVerification,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verifier(base_url: &str, api_key: Option<&str>) -> HttpPaymentVerifier {
    HttpPaymentVerifier {
        base_url: base_url.to_string(),
        api_key: api_key.map(str::to_string),
        timeout_ms: 500,
        client: reqwest::Client::new(),
    }
}

async fn mock(behavior: &str) -> Result<ProviderVerification, WebhookError> {
    MockPaymentVerifier::with_status(behavior).verify("p").await
}

#[test]
fn allow_list_ignores_case() {
    for status in ["succeeded", "COMPLETED", "Paid", "processed", " paid "] {
        assert!(is_accepted_status(status), "{status} should be accepted");
    }
    for status in ["pending", "failed", "refunded", ""] {
        assert!(!is_accepted_status(status), "{status} should be rejected");
    }
}

#[test]
fn status_key_priority() {
    let nested = json!({ "status": "pending", "data": { "status": "paid" } });
    assert_eq!(status_from_body(&nested).as_deref(), Some("paid"));

    let payment_status = json!({ "payment_status": "completed" });
    assert_eq!(status_from_body(&payment_status).as_deref(), Some("completed"));

    let state = json!({ "state": "processed" });
    assert_eq!(status_from_body(&state).as_deref(), Some("processed"));

    assert_eq!(status_from_body(&json!({ "amount": 1 })), None);
}

#[tokio::test]
async fn missing_api_key_skips_verification() {
    let verifier = verifier("http://127.0.0.1:1", None);
    let result = verifier.verify("pay_1").await.unwrap();
    assert!(result.verified);
    assert!(result.skipped);
}

#[tokio::test]
async fn paid_status_in_any_case_is_accepted() {
    let server = MockServer::start().await;
    let body = json!({ "id": "pay_1", "status": "Paid" });
    Mock::given(method("GET"))
        .and(path("/payments/pay_1"))
        .and(header("authorization", "Bearer key_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let verifier = verifier(&server.uri(), Some("key_123"));
    let result = verifier.verify("pay_1").await.unwrap();
    assert!(result.verified);
    assert!(!result.skipped);
    assert_eq!(result.status, "Paid");
}

#[tokio::test]
async fn pending_status_is_rejected() {
    let server = MockServer::start().await;
    let body = json!({ "status": "pending" });
    Mock::given(method("GET"))
        .and(path("/payments/pay_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let verifier = verifier(&server.uri(), Some("key"));
    let err = verifier.verify("pay_2").await.unwrap_err();
    assert_eq!(err.status().as_u16(), 400);
    assert!(err.to_string().contains("pending"));
}

#[tokio::test]
async fn ok_response_without_status_key_is_rejected() {
    let server = MockServer::start().await;
    let body = json!({ "id": "pay_x", "amount": 1 });
    Mock::given(method("GET"))
        .and(path("/payments/pay_x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let verifier = verifier(&server.uri(), Some("key"));
    let err = verifier.verify("pay_x").await.unwrap_err();
    assert_eq!(err.status().as_u16(), 400);
    assert!(err.to_string().contains("carried no payment status"));
    match err {
        WebhookError::ProviderVerificationFailed {
            payment_id,
            provider_status,
            ..
        } => {
            assert_eq!(payment_id, "pay_x");
            assert_eq!(provider_status, Some(200));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn provider_error_status_is_echoed() {
    let server = MockServer::start().await;
    let template = ResponseTemplate::new(404).set_body_string("payment not found");
    Mock::given(method("GET"))
        .and(path("/payments/pay_3"))
        .respond_with(template)
        .mount(&server)
        .await;

    let verifier = verifier(&server.uri(), Some("key"));
    let err = verifier.verify("pay_3").await.unwrap_err();
    match err {
        WebhookError::ProviderVerificationFailed {
            payment_id,
            provider_status,
            message,
        } => {
            assert_eq!(payment_id, "pay_3");
            assert_eq!(provider_status, Some(404));
            assert!(message.contains("payment not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn base_url_path_is_kept() {
    let server = MockServer::start().await;
    let body = json!({ "data": { "state": "succeeded" } });
    Mock::given(method("GET"))
        .and(path("/v1/payments/pay_4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let base = format!("{}/v1", server.uri());
    let result = verifier(&base, Some("key")).verify("pay_4").await.unwrap();
    assert_eq!(result.status, "succeeded");
}

#[tokio::test]
async fn slow_provider_times_out_as_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "paid" }))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let verifier = verifier(&server.uri(), Some("key"));
    let err = verifier.verify("pay_5").await.unwrap_err();
    assert!(matches!(err, WebhookError::Internal(_)));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn mock_verifier_behaviors() {
    assert!(mock("PAID").await.is_ok());
    assert!(mock("SKIP").await.unwrap().skipped);

    let not_found = mock("NOT_FOUND").await.unwrap_err();
    assert_eq!(not_found.status().as_u16(), 400);

    let network = mock("NETWORK_ERROR").await;
    assert!(matches!(network, Err(WebhookError::Internal(_))));
}
