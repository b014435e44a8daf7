//! Credential and domain value types.
//!
//! # Overview
//!
//! - [`ApiKey`]: A validated API key newtype
//! - [`ApiSecretKey`]: A validated API secret key with masked debug output
//! - [`AccessToken`]: A validated OAuth access token with masked debug output
//! - [`ShopDomain`]: A validated `<shop>.myshopify.com` domain
//! - [`ApiCredentials`]: The key/secret pair identifying an app
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{ApiCredentials, ApiKey, ApiSecretKey};
//!
//! let credentials = ApiCredentials::new(
//!     ApiKey::new("my-api-key").unwrap(),
//!     ApiSecretKey::new("my-secret").unwrap(),
//! );
//! assert_eq!(credentials.api_key().as_ref(), "my-api-key");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiKey, ApiSecretKey, ShopDomain};

use base64::prelude::*;
use serde::Deserialize;

/// The API key and secret of an app.
///
/// Used to sign and verify requests, to exchange grant codes, and to build
/// basic-auth headers for private apps.
///
/// Deserializes from `{"api_key": "...", "api_secret_key": "..."}` with the
/// same validation as the constructors.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiCredentials {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
}

impl ApiCredentials {
    /// Pairs an API key with its secret.
    #[must_use]
    pub const fn new(api_key: ApiKey, api_secret_key: ApiSecretKey) -> Self {
        Self {
            api_key,
            api_secret_key,
        }
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the `Authorization` header value used by private apps.
    ///
    /// ```rust
    /// use shopify_app_auth::{ApiCredentials, ApiKey, ApiSecretKey};
    ///
    /// let credentials = ApiCredentials::new(
    ///     ApiKey::new("key").unwrap(),
    ///     ApiSecretKey::new("secret").unwrap(),
    /// );
    /// assert_eq!(credentials.basic_auth_header(), "Basic a2V5OnNlY3JldA==");
    /// ```
    #[must_use]
    pub fn basic_auth_header(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.api_key.as_ref(),
            self.api_secret_key.as_ref()
        );
        format!("Basic {}", BASE64_STANDARD.encode(pair))
    }
}

// Verify ApiCredentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiCredentials>();
};
