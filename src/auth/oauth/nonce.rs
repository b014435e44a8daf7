//! CSRF nonce carried through the OAuth `state` parameter.
//!
//! Generate a [`Nonce`] before redirecting the merchant to Shopify, store it
//! (session, cookie), and pass the same value to
//! [`validate_authorization_request`](crate::auth::oauth::validate_authorization_request)
//! when the merchant comes back.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::auth::oauth::hmac::constant_time_compare;

/// An opaque `state` value used for CSRF protection.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::Nonce;
///
/// let nonce = Nonce::generate();
/// assert_eq!(nonce.as_ref().len(), 15);
/// assert!(nonce.matches(nonce.as_ref()));
///
/// let stored = Nonce::from_raw("value-from-session");
/// assert!(!stored.matches("something-else"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nonce(String);

// Verify Nonce is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Nonce>();
};

impl Nonce {
    const LENGTH: usize = 15;

    /// Generates a 15-character alphanumeric nonce from the thread-local CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    /// Wraps a previously stored value.
    ///
    /// An empty value is accepted. It only matches an empty `state`, which
    /// gives no CSRF protection.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` if `state` equals this nonce, compared in constant time.
    #[must_use]
    pub fn matches(&self, state: &str) -> bool {
        constant_time_compare(&self.0, state)
    }
}

impl AsRef<str> for Nonce {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
