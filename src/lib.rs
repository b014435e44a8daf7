//! # Shopify App Auth
//!
//! Authentication plumbing for Shopify apps: the OAuth handshake for public
//! apps, authenticity checks for storefront redirects and webhooks, and
//! call-budget aware REST and GraphQL clients.
//!
//! ## Overview
//!
//! This crate provides:
//! - Validated value types for credentials, shop domains and scope sets
//! - Scope algebra with implied-scope handling via [`Scopes`]
//! - The OAuth authorization code grant via [`auth::oauth`] and [`Shopify`]
//! - HMAC verification of redirects and webhook deliveries
//! - Webhook validation via [`webhooks`]
//! - REST and GraphQL clients that report the API call budget via [`clients`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_app_auth::{ApiCredentials, ApiKey, ApiSecretKey, ShopDomain};
//!
//! let credentials = ApiCredentials::new(
//!     ApiKey::new("your-api-key").unwrap(),
//!     ApiSecretKey::new("your-api-secret").unwrap(),
//! );
//! let shop = ShopDomain::new("my-store.myshopify.com").unwrap();
//!
//! assert_eq!(shop.shop_name(), "my-store");
//! assert_eq!(credentials.api_key().as_ref(), "your-api-key");
//! ```
//!
//! ## OAuth Handshake
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_app_auth::auth::oauth::{Nonce, RequestParams};
//! use shopify_app_auth::clients::ReqwestTransport;
//! use shopify_app_auth::Shopify;
//!
//! let shopify = Shopify::new(Arc::new(ReqwestTransport::new()?), credentials);
//! let app = shopify.public_app(
//!     "https://app.example.com/callback",
//!     "read_products,write_orders".parse()?,
//!     None,
//! )?;
//!
//! // Step 1: redirect the merchant
//! let nonce = Nonce::generate();
//! let url = app.authorization_url(&shop, &nonce, false);
//!
//! // Step 2: validate the redirect back
//! let params = RequestParams::from_query_string(query);
//! let request = app.validate_authorization_request(&params, &nonce, Some(&shop))?;
//!
//! // Step 3: exchange the code; fails if a required scope was not granted
//! let response = app.authorize_application(&request).await?;
//! let client = app.public_app_client(shop, response.access_token().clone());
//! ```
//!
//! ## Private Apps
//!
//! ```rust
//! use shopify_app_auth::{private_app_auth_headers, ApiCredentials, ApiKey, ApiSecretKey};
//!
//! let credentials = ApiCredentials::new(
//!     ApiKey::new("key").unwrap(),
//!     ApiSecretKey::new("secret").unwrap(),
//! );
//! let headers = private_app_auth_headers(&credentials);
//! assert_eq!(headers["Authorization"], "Basic a2V5OnNlY3JldA==");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: credentials and transport are passed explicitly
//! - **Fail-fast validation**: all value types validate on construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Constant-time comparisons**: signatures and nonces never leak timing
//! - **No retries**: every failure is reported to the caller as-is

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
mod shopify;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use auth::{AssociatedUser, ScopeDifference, Scopes};
pub use config::{AccessToken, ApiCredentials, ApiKey, ApiSecretKey, ShopDomain};
pub use error::ValidationError;
pub use shopify::Shopify;

pub use auth::oauth::{
    AuthorizationError, AuthorizationRequest, AuthorizationResponse, Nonce, PublicApp,
    PublicAppBuilder,
};
pub use clients::{
    private_app_auth_headers, public_app_auth_headers, CallBudget, ClientError, GraphqlClient,
    ReqwestTransport, ShopifyClient, ShopifyResponse, Transport, TransportError,
};
pub use webhooks::{WebhookRequest, WebhookValidationError, WebhookValidator};
