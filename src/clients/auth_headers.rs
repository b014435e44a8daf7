//! Outbound authentication headers.
//!
//! Private apps authenticate with HTTP basic auth built from the API key and
//! secret. Public apps send the OAuth access token in `X-Shopify-Access-Token`.

use std::collections::HashMap;

use crate::config::{AccessToken, ApiCredentials};

/// Header carrying a public app's access token.
pub const HEADER_ACCESS_TOKEN: &str = "X-Shopify-Access-Token";

/// Header carrying a private app's basic-auth credentials.
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Returns the headers authenticating a private app.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::{private_app_auth_headers, ApiCredentials, ApiKey, ApiSecretKey};
///
/// let credentials = ApiCredentials::new(
///     ApiKey::new("key").unwrap(),
///     ApiSecretKey::new("secret").unwrap(),
/// );
/// let headers = private_app_auth_headers(&credentials);
/// assert_eq!(headers["Authorization"], "Basic a2V5OnNlY3JldA==");
/// ```
#[must_use]
pub fn private_app_auth_headers(credentials: &ApiCredentials) -> HashMap<String, String> {
    HashMap::from([(
        HEADER_AUTHORIZATION.to_string(),
        credentials.basic_auth_header(),
    )])
}

/// Returns the headers authenticating a public app with an access token.
#[must_use]
pub fn public_app_auth_headers(access_token: &AccessToken) -> HashMap<String, String> {
    HashMap::from([(
        HEADER_ACCESS_TOKEN.to_string(),
        access_token.as_ref().to_string(),
    )])
}
