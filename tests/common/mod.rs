//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shopify_app_auth::auth::oauth::hmac::{compute_signature, redirect_signable_string};
use shopify_app_auth::auth::oauth::RequestParams;
use shopify_app_auth::clients::{ReqwestTransport, TransportRequest, TransportResponse};
use shopify_app_auth::{ApiCredentials, ApiKey, ApiSecretKey, Transport, TransportError};

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";
pub const SHOP: &str = "test-shop.myshopify.com";

pub fn credentials() -> ApiCredentials {
    ApiCredentials::new(
        ApiKey::new(API_KEY).unwrap(),
        ApiSecretKey::new(API_SECRET).unwrap(),
    )
}

/// Sends every request to a mock server instead of the shop's host.
#[derive(Debug)]
pub struct MockShopTransport {
    inner: ReqwestTransport,
    base_url: String,
    sent: Mutex<Vec<TransportRequest>>,
}

impl MockShopTransport {
    pub fn new(base_url: String) -> Arc<Self> {
        Arc::new(Self {
            inner: ReqwestTransport::new().unwrap(),
            base_url,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<TransportRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockShopTransport {
    async fn call(
        &self,
        mut request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        request.base_url = self.base_url.clone();
        self.inner.call(request).await
    }
}

/// Builds redirect parameters signed with [`API_SECRET`].
pub fn signed_redirect(fields: &[(&str, &str)]) -> RequestParams {
    let hmac = compute_signature(
        &redirect_signable_string(fields.iter().copied()),
        API_SECRET,
    );
    let mut pairs: Vec<(String, String)> = fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    pairs.push(("hmac".to_string(), hmac));
    RequestParams::from_pairs(pairs)
}
