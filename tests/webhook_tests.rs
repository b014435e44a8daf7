//! Integration tests for webhook validation.

mod common;

use common::{credentials, MockShopTransport, SHOP};
use shopify_app_auth::webhooks::{
    InboundWebhook, WebhookHeaders, WebhookValidationError, WebhookValidator,
};
use shopify_app_auth::{ApiSecretKey, Shopify};
use std::collections::BTreeMap;

const BODY: &[u8] = br#"{"id":1}"#;
const SIGNATURE: &str = "Z1PTSunFKhGV0B2iDV3egGE8TThlQMRrvLklMBTdxQU=";

fn validator() -> WebhookValidator {
    WebhookValidator::new(ApiSecretKey::new("s3cr3t").unwrap())
}

fn delivery(body: &[u8], signature: &str) -> InboundWebhook {
    InboundWebhook::new(body)
        .with_header("x-shopify-shop-domain", SHOP)
        .with_header("x-shopify-topic", "orders/create")
        .with_header("x-shopify-hmac-sha256", signature)
        .with_header("content-type", "application/json")
        .with_header("x-shopify-webhook-id", "b54557e4-bdd9-4b37-8a5f-bf7d70bcd043")
        .with_header("x-shopify-api-version", "2025-10")
}

/// A request type from some web framework, with headers in a sorted map.
struct FrameworkRequest {
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl WebhookHeaders for FrameworkRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

#[test]
fn test_authentic_delivery_is_accepted() {
    let request = validator().validate(&delivery(BODY, SIGNATURE)).unwrap();

    assert_eq!(request.shop_domain().as_ref(), SHOP);
    assert_eq!(request.topic(), "orders/create");
    assert_eq!(
        request.webhook_id(),
        Some("b54557e4-bdd9-4b37-8a5f-bf7d70bcd043")
    );
    assert_eq!(request.api_version(), Some("2025-10"));
    assert_eq!(request.payload()["id"], 1);
}

#[test]
fn test_any_other_signature_is_rejected() {
    for signature in [
        "Z1PTSunFKhGV0B2iDV3egGE8TThlQMRrvLklMBTdxQU",
        "z1PTSunFKhGV0B2iDV3egGE8TThlQMRrvLklMBTdxQU=",
        "not-a-signature",
    ] {
        let error = validator()
            .validate(&delivery(BODY, signature))
            .unwrap_err();
        assert!(
            matches!(error, WebhookValidationError::HmacMismatch { .. }),
            "signature {signature:?} should be rejected"
        );
    }
}

#[test]
fn test_signature_from_another_secret_is_rejected() {
    let other = WebhookValidator::new(ApiSecretKey::new("other-secret").unwrap());
    let error = other.validate(&delivery(BODY, SIGNATURE)).unwrap_err();
    assert!(error
        .to_string()
        .starts_with(&format!("The HMAC provided by Shopify ({SIGNATURE})")));
}

#[test]
fn test_top_level_array_is_rejected() {
    let body = b"[{\"id\":1}]";
    let signature =
        shopify_app_auth::auth::oauth::hmac::compute_signature_base64(body, "s3cr3t");
    let error = validator()
        .validate(&delivery(body, &signature))
        .unwrap_err();
    assert!(matches!(
        error,
        WebhookValidationError::MalformedBody { source: None }
    ));
}

#[test]
fn test_revalidation_yields_equal_requests() {
    let webhook = delivery(BODY, SIGNATURE);
    assert_eq!(
        validator().validate(&webhook).unwrap(),
        validator().validate(&webhook).unwrap()
    );
}

#[test]
fn test_custom_request_type() {
    let mut headers = BTreeMap::new();
    headers.insert("X-Shopify-Shop-Domain".to_string(), SHOP.to_string());
    headers.insert("X-Shopify-Topic".to_string(), "app/uninstalled".to_string());
    headers.insert("X-Shopify-Hmac-Sha256".to_string(), SIGNATURE.to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    let request = FrameworkRequest {
        headers,
        body: BODY.to_vec(),
    };

    let validated = validator().validate(&request).unwrap();
    assert_eq!(validated.topic(), "app/uninstalled");
    assert_eq!(validated.webhook_id(), None);
}

#[test]
fn test_shopify_webhook_validator_uses_app_secret() {
    let shopify = Shopify::new(
        MockShopTransport::new("http://127.0.0.1:9".to_string()),
        credentials(),
    );
    let signature = shopify_app_auth::auth::oauth::hmac::compute_signature_base64(
        BODY,
        common::API_SECRET,
    );

    let request = shopify
        .webhook_validator()
        .validate(&delivery(BODY, &signature))
        .unwrap();
    assert_eq!(request.topic(), "orders/create");
}
