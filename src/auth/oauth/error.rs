//! Authorization error types.
//!
//! Every failure of the authorization handshake is an [`AuthorizationError`]:
//! an invalid shop, missing redirect fields, a nonce or HMAC mismatch, a failed
//! code exchange, a malformed exchange response, or required scopes the
//! merchant did not grant.
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::AuthorizationError;
//!
//! let error = AuthorizationError::NonceMismatch;
//! assert_eq!(error.to_string(), "Invalid or missing nonce.");
//! ```

use thiserror::Error;

use crate::clients::TransportError;
use crate::error::ValidationError;

/// Errors that can occur while authorizing an app installation.
///
/// # Thread Safety
///
/// `AuthorizationError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// The `shop` field is missing or not a valid shop domain.
    #[error("The shop provided by Shopify is invalid: {source}")]
    InvalidShop {
        /// Why the shop was rejected.
        #[source]
        source: ValidationError,
    },

    /// A required redirect field is absent.
    #[error("The provided request data is missing one of the following keys: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// The `code` field is missing or empty.
    #[error("Invalid or missing grant code.")]
    InvalidGrantCode,

    /// The `state` field does not equal the expected nonce.
    #[error("Invalid or missing nonce.")]
    NonceMismatch,

    /// The redirect signature does not match the one computed locally.
    #[error("The HMAC provided by Shopify ({provided}) doesn't match the HMAC verification ({computed}).")]
    HmacMismatch {
        /// The `hmac` field received.
        provided: String,
        /// The signature computed with the app secret.
        computed: String,
    },

    /// The redirect comes from a different shop than the one expected.
    #[error("The shop provided by Shopify ({provided}) does not match the shop provided to this API ({expected})")]
    ShopMismatch {
        /// The shop named in the redirect.
        provided: String,
        /// The shop the caller expected.
        expected: String,
    },

    /// The code exchange call failed.
    #[error("Authorization request failed: {source}")]
    ExchangeFailed {
        /// The upstream HTTP status, when there was one.
        status: Option<u16>,
        /// The transport failure.
        #[source]
        source: TransportError,
    },

    /// The code exchange response lacks required members.
    #[error("Authorization response is malformed: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// The merchant did not grant every required scope.
    #[error("The user did not grant all required scopes (required: {required}, not granted: {not_granted})")]
    ScopesNotGranted {
        /// The required scopes in canonical form.
        required: String,
        /// The required scopes that are missing, in canonical form.
        not_granted: String,
    },
}

impl AuthorizationError {
    /// Returns the upstream HTTP status of a failed code exchange.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ExchangeFailed { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<TransportError> for AuthorizationError {
    fn from(source: TransportError) -> Self {
        Self::ExchangeFailed {
            status: source.status(),
            source,
        }
    }
}

// Verify AuthorizationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationError>();
};
