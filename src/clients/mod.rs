//! HTTP client types for Shopify API communication.
//!
//! # Overview
//!
//! - [`Transport`]: The async capability every outbound call goes through
//! - [`ReqwestTransport`]: The bundled reqwest-backed transport
//! - [`TransportRequest`] / [`TransportResponse`]: What a transport consumes and returns
//! - [`ShopifyClient`]: REST client bound to a shop and auth headers
//! - [`GraphqlClient`]: Admin GraphQL client bound to a shop and auth headers
//! - [`ShopifyResponse`] / [`CallBudget`]: Responses with rate-limit accounting
//! - [`private_app_auth_headers`] / [`public_app_auth_headers`]: Outbound auth headers
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_app_auth::clients::{
//!     public_app_auth_headers, HttpMethod, ReqwestTransport, ShopifyClient,
//! };
//! use shopify_app_auth::{AccessToken, ShopDomain};
//!
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let token = AccessToken::new("shpat_...")?;
//! let client = ShopifyClient::new(
//!     transport,
//!     ShopDomain::new("my-store.myshopify.com")?,
//!     public_app_auth_headers(&token),
//! );
//!
//! let response = client.call(HttpMethod::Get, "/admin/api/2025-10/shop.json", None, &[]).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Nothing here retries or throttles. [`ShopifyResponse`] only reports the
//! budget Shopify returned; callers decide what to do with it.

mod auth_headers;
mod errors;
pub mod graphql;
mod http_client;
mod http_response;
pub mod rest;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use auth_headers::{
    private_app_auth_headers, public_app_auth_headers, HEADER_ACCESS_TOKEN, HEADER_AUTHORIZATION,
};
pub use errors::{ClientError, TransportError};
pub use http_client::{ReqwestTransport, SDK_VERSION};
pub use http_response::{CallBudget, ShopifyResponse, HEADER_API_CALL_LIMIT};
pub use transport::{
    HttpMethod, Transport, TransportRequest, TransportRequestBuilder, TransportResponse,
};

pub use graphql::GraphqlClient;
pub use rest::ShopifyClient;
