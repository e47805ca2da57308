//! Forwarder client integration tests against a mock upstream.

use std::time::Duration;

use flipopay_core::{PayoutRequest, TransactionType};
use flipopay_forwarder::{ClientConfig, ForwardError, ForwarderClient};
use serde_json::{json, Number, Value};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn sample_payout() -> PayoutRequest {
    PayoutRequest {
        amount: Number::from(1500),
        customer_name: "Asha Verma".to_string(),
        customer_phone_number: "9876543210".to_string(),
        customer_email: "asha.verma@example.com".to_string(),
        transaction_type: TransactionType::Imps,
        destination_bank: "HDFC Bank".to_string(),
        account_number: "001234567890".to_string(),
        beneficiary_location: "Mumbai".to_string(),
        ifsc: "HDFC0001234".to_string(),
        merchant_id: "MER123".to_string(),
        affiliate_id: "AFF456".to_string(),
        reference: "ref78910".to_string(),
    }
}

fn client_for(server: &MockServer, secret: &str) -> ForwarderClient {
    ForwarderClient::new(ClientConfig {
        upstream_url: format!("{}/api/v1/payouts/initiate", server.uri()),
        secret_key: secret.to_string(),
        timeout: Duration::from_secs(2),
        user_agent: "Flipopay-Gateway/test".to_string(),
    })
    .expect("client builds")
}

#[tokio::test]
async fn sends_secret_header_and_normalized_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/payouts/initiate"))
        .and(header("X-Secret-Key", "s3cret"))
        .and(body_json(json!({
            "amount": 1500,
            "customerName": "Asha Verma",
            "customerPhoneNumber": "9876543210",
            "customerEmail": "asha.verma@example.com",
            "transactionType": "IMPS",
            "destinationBank": "HDFC Bank",
            "accountNumber": "001234567890",
            "beneficiaryLocation": "Mumbai",
            "ifsc": "HDFC0001234",
            "merchantID": "MER123",
            "affiliateID": "AFF456",
            "reference": "ref78910"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "txnId": "X" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "s3cret");
    let response = client.forward(&sample_payout()).await.expect("forward succeeds");

    assert!(response.is_success);
    assert_eq!(response.status, 200);
    assert_eq!(response.body, Some(json!({ "txnId": "X" })));
}

#[tokio::test]
async fn upstream_error_status_and_body_captured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "error": "upstream unavailable" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, "s3cret");
    let response = client.forward(&sample_payout()).await.expect("HTTP errors are not transport errors");

    assert!(!response.is_success);
    assert_eq!(response.status, 503);
    assert_eq!(response.body, Some(json!({ "error": "upstream unavailable" })));
}

#[tokio::test]
async fn empty_upstream_body_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST")).respond_with(ResponseTemplate::new(204)).mount(&server).await;

    let client = client_for(&server, "s3cret");
    let response = client.forward(&sample_payout()).await.expect("forward succeeds");

    assert_eq!(response.status, 204);
    assert_eq!(response.body, None);
}

#[tokio::test]
async fn non_json_upstream_body_carried_as_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server, "s3cret");
    let response = client.forward(&sample_payout()).await.expect("forward succeeds");

    assert_eq!(response.status, 502);
    assert_eq!(response.body, Some(Value::String("Bad Gateway".to_string())));
}

#[tokio::test]
async fn connection_refused_reported_as_network_error() {
    let client = ForwarderClient::new(ClientConfig {
        upstream_url: "http://127.0.0.1:1/api/v1/payouts/initiate".to_string(),
        secret_key: "s3cret".to_string(),
        timeout: Duration::from_secs(2),
        user_agent: "Flipopay-Gateway/test".to_string(),
    })
    .expect("client builds");

    let err = client.forward(&sample_payout()).await.expect_err("unreachable upstream must fail");

    assert!(matches!(err, ForwardError::Network { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn slow_upstream_reported_as_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = ForwarderClient::new(ClientConfig {
        upstream_url: format!("{}/api/v1/payouts/initiate", server.uri()),
        secret_key: "s3cret".to_string(),
        timeout: Duration::from_millis(200),
        user_agent: "Flipopay-Gateway/test".to_string(),
    })
    .expect("client builds");

    let err = client.forward(&sample_payout()).await.expect_err("slow upstream must time out");

    assert!(matches!(err, ForwardError::Timeout { .. }), "unexpected error: {err}");
}
