//! REST client implementation for the Shopify Admin API.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::http_response::{CallBudget, HEADER_API_CALL_LIMIT};
use crate::clients::{ClientError, HttpMethod, ShopifyResponse, Transport, TransportRequest};
use crate::config::ShopDomain;

/// REST API client bound to one shop and one set of auth headers.
///
/// Every call goes through the shared [`Transport`]; the response carries the
/// REST call budget parsed from `X-Shopify-Shop-Api-Call-Limit`.
///
/// # Thread Safety
///
/// `ShopifyClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_app_auth::{Shopify, ShopDomain, AccessToken};
///
/// let client = shopify.public_app_client(
///     ShopDomain::new("my-store.myshopify.com")?,
///     AccessToken::new("shpat_...")?,
/// );
///
/// let response = client
///     .call(HttpMethod::Get, "/admin/api/2025-10/products.json", None, &[])
///     .await?;
/// println!("{:?} calls left", response.calls_remaining());
/// ```
#[derive(Clone, Debug)]
pub struct ShopifyClient {
    transport: Arc<dyn Transport>,
    shop: ShopDomain,
    headers: HashMap<String, String>,
}

// Verify ShopifyClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyClient>();
};

impl ShopifyClient {
    /// Creates a client that sends `headers` (plus a JSON content type) with every call.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        shop: ShopDomain,
        mut headers: HashMap<String, String>,
    ) -> Self {
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            transport,
            shop,
            headers,
        }
    }

    /// Returns the shop this client talks to.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the headers sent with every call.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Sends a request to `endpoint` on the shop.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the transport fails or the shop
    /// answers with a non-2xx status.
    pub async fn call(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<serde_json::Value>,
        query: &[(&str, &str)],
    ) -> Result<ShopifyResponse, ClientError> {
        let mut builder = TransportRequest::builder(method, self.shop.shop_url(), endpoint)
            .headers(&self.headers)
            .query(query.iter().copied());
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = self.transport.call(builder.build()).await?;

        let parsed_body = response
            .parsed_body
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let budget = response
            .header(HEADER_API_CALL_LIMIT)
            .and_then(CallBudget::from_call_limit_header);

        Ok(match budget {
            Some(budget) => {
                ShopifyResponse::limited(response.status, response.raw_body, parsed_body, budget)
            }
            None => ShopifyResponse::unlimited(response.status, response.raw_body, parsed_body),
        })
    }
}
