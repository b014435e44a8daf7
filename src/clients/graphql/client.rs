//! GraphQL client implementation for Shopify Admin API.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL queries
//! against the Shopify Admin API.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::clients::http_response::CallBudget;
use crate::clients::{ClientError, HttpMethod, ShopifyResponse, Transport, TransportRequest};
use crate::config::ShopDomain;

/// Path of the Admin GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/admin/api/graphql.json";

/// GraphQL API client for Shopify Admin API.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let client = shopify.public_app_graphql_client(shop, token);
///
/// let response = client
///     .query(
///         "query GetProduct($id: ID!) { product(id: $id) { title } }",
///         Some(json!({ "id": "gid://shopify/Product/123" })),
///     )
///     .await?;
/// println!("{}", response.parsed_body()["product"]["title"]);
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    transport: Arc<dyn Transport>,
    shop: ShopDomain,
    headers: HashMap<String, String>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client that sends `headers` with every query.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        shop: ShopDomain,
        headers: HashMap<String, String>,
    ) -> Self {
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

    /// Executes a query and returns its `data` member.
    ///
    /// The returned [`ShopifyResponse`] has `data` as its parsed body and the
    /// point-cost budget from `extensions.cost` when Shopify reported one.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if the transport fails
    /// - [`ClientError::Graphql`] if the response has a non-empty `errors` member
    /// - [`ClientError::MissingData`] if the response has no `data` member
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<ShopifyResponse, ClientError> {
        let body = json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| json!({})),
        });

        let request =
            TransportRequest::builder(HttpMethod::Post, self.shop.shop_url(), GRAPHQL_PATH)
                .headers(&self.headers)
                .body(body)
                .build();

        let response = self.transport.call(request).await?;
        let parsed_body = response.parsed_body.unwrap_or_else(|| json!({}));

        if let Some(errors) = parsed_body.get("errors").filter(|e| is_truthy(e)) {
            return Err(ClientError::Graphql {
                errors: errors.clone(),
            });
        }

        let data = match parsed_body.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => return Err(ClientError::MissingData),
        };

        Ok(match CallBudget::from_graphql_extensions(&parsed_body) {
            Some(budget) => {
                ShopifyResponse::limited(response.status, response.raw_body, data, budget)
            }
            None => ShopifyResponse::unlimited(response.status, response.raw_body, data),
        })
    }
}

// `"errors": []`, `null` or `false` mean no errors.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
    }
}
