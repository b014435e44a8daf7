//! HMAC-SHA256 signing and verification.
//!
//! Shopify signs two kinds of inbound traffic with the app's secret key:
//!
//! - OAuth redirects carry a hex `hmac` field computed over the other query
//!   fields (see [`redirect_signable_string`]).
//! - Webhooks carry a base64 `X-Shopify-Hmac-SHA256` header computed over the
//!   raw body bytes.
//!
//! # Security
//!
//! All signature and nonce comparisons use [`constant_time_compare`].
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::hmac::{compute_signature, compute_signature_base64};
//!
//! // Hex-encoded signature for OAuth redirects
//! let message = "code=abc123&shop=example.myshopify.com&state=xyz";
//! let signature = compute_signature(message, "my-api-secret");
//! assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
//!
//! // Base64-encoded signature for webhooks
//! let webhook_sig = compute_signature_base64(b"webhook payload", "my-api-secret");
//! assert_eq!(webhook_sig.len(), 44);
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// The redirect field holding the signature, excluded from the signed message.
pub const HMAC_FIELD: &str = "hmac";

fn sign(message: &[u8], secret: &str) -> impl AsRef<[u8]> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes()
}

/// Computes a lowercase hex HMAC-SHA256 signature of `message`.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::hmac::compute_signature;
///
/// let sig = compute_signature("message", "key");
/// assert_eq!(sig, "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a");
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    hex::encode(sign(message.as_bytes(), secret))
}

/// Computes a standard base64 HMAC-SHA256 signature of raw bytes.
///
/// Takes bytes rather than a string so webhook bodies are signed exactly as
/// received.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    BASE64_STANDARD.encode(sign(message, secret))
}

/// Compares two strings in constant time.
///
/// Strings of different lengths compare unequal.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Builds the message Shopify signs for an OAuth redirect.
///
/// Drops the `hmac` field and escapes keys and values by replacing `&` with
/// `%26` and then `%` with `%25`, plus `=` with `%3D` in keys. Each pair is
/// joined as `key=value`, and the sorted pairs are joined with `&`.
///
/// Keys and values are used as given. They must be the once-decoded query
/// values, which is what web frameworks and
/// [`RequestParams::from_query_string`](crate::auth::oauth::RequestParams::from_query_string)
/// produce.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::hmac::redirect_signable_string;
///
/// let message = redirect_signable_string([
///     ("state", "n1"),
///     ("hmac", "ignored"),
///     ("code", "a&b"),
///     ("shop", "x.myshopify.com"),
/// ]);
/// assert_eq!(message, "code=a%2526b&shop=x.myshopify.com&state=n1");
/// ```
pub fn redirect_signable_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut signable: Vec<String> = pairs
        .into_iter()
        .filter(|(key, _)| *key != HMAC_FIELD)
        .map(|(key, value)| format!("{}={}", escape(key, true), escape(value, false)))
        .collect();
    signable.sort_unstable();
    signable.join("&")
}

fn escape(input: &str, is_key: bool) -> String {
    // Substitutions run in sequence, so `&` ends up as `%2526`.
    let escaped = input.replace('&', "%26").replace('%', "%25");
    if is_key {
        escaped.replace('=', "%3D")
    } else {
        escaped
    }
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}
