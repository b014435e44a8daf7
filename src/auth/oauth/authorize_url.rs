//! OAuth authorization URL generation.
//!
//! The first step of the handshake: send the merchant to
//! `https://<shop>.myshopify.com/admin/oauth/authorize` with the app's client
//! id, the requested scopes, the redirect URI and a CSRF nonce.

use crate::auth::oauth::nonce::Nonce;
use crate::auth::Scopes;
use crate::config::{ApiKey, ShopDomain};

/// Path of Shopify's authorization endpoint.
pub const AUTHORIZE_PATH: &str = "/admin/oauth/authorize";

/// Builds the URL that asks the merchant to install the app.
///
/// With `online_access` set, `grant_options[]=per-user` is added and the
/// resulting token is tied to the approving user.
///
/// Keys and values are percent-encoded.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::{authorization_url, Nonce};
/// use shopify_app_auth::{ApiKey, Scopes, ShopDomain};
///
/// let url = authorization_url(
///     &ApiKey::new("my-key").unwrap(),
///     &ShopDomain::new("my-store.myshopify.com").unwrap(),
///     &"read_products".parse::<Scopes>().unwrap(),
///     "https://app.example.com/callback",
///     &Nonce::from_raw("n1"),
///     false,
/// );
///
/// assert_eq!(
///     url,
///     "https://my-store.myshopify.com/admin/oauth/authorize?client_id=my-key&scope=read_products\
///      &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&state=n1"
/// );
/// ```
#[must_use]
pub fn authorization_url(
    api_key: &ApiKey,
    shop: &ShopDomain,
    scopes: &Scopes,
    redirect_url: &str,
    nonce: &Nonce,
    online_access: bool,
) -> String {
    let mut params = vec![
        ("client_id", api_key.as_ref().to_string()),
        ("scope", scopes.to_string()),
        ("redirect_uri", redirect_url.to_string()),
        ("state", nonce.as_ref().to_string()),
    ];

    if online_access {
        params.push(("grant_options[]", "per-user".to_string()));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{AUTHORIZE_PATH}?{query_string}", shop.shop_url())
}
