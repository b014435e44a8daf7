//! REST API client for Shopify Admin API.
//!
//! [`ShopifyClient`] sends a method, an endpoint path, an optional JSON body
//! and query parameters, and reports the REST call budget of each response.
//!
//! # Deprecation Notice
//!
//! The Shopify Admin REST API is deprecated. Responses carrying the
//! `X-Shopify-API-Deprecated-Reason` header are logged at `warn` level by
//! [`ReqwestTransport`](crate::clients::ReqwestTransport).

mod client;

pub use client::ShopifyClient;
