//! Webhook validation errors.
//!
//! Every variant means "reject the delivery". None of them is retryable.

use crate::error::ValidationError;
use thiserror::Error;

/// Error returned when an inbound webhook is not authentic or not well-formed.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::webhooks::WebhookValidationError;
///
/// let error = WebhookValidationError::MissingHeader { header: "X-Shopify-Topic" };
/// assert_eq!(error.to_string(), "Missing webhook header: X-Shopify-Topic");
/// ```
#[derive(Debug, Error)]
pub enum WebhookValidationError {
    /// The `X-Shopify-Shop-Domain` header is missing or not a valid shop domain.
    #[error("Invalid shop domain: {source}")]
    InvalidShopDomain {
        /// The domain validation failure.
        #[source]
        source: ValidationError,
    },

    /// A required header is absent or empty.
    #[error("Missing webhook header: {header}")]
    MissingHeader {
        /// The name of the missing header.
        header: &'static str,
    },

    /// The signature header does not match the body.
    #[error("The HMAC provided by Shopify ({provided}) doesn't match the HMAC verification ({computed}).")]
    HmacMismatch {
        /// The signature sent in `X-Shopify-Hmac-SHA256`.
        provided: String,
        /// The signature computed over the raw body.
        computed: String,
    },

    /// The body is not declared as JSON.
    #[error("Unsupported webhook content type {content_type}")]
    UnsupportedContentType {
        /// The received `Content-Type` header.
        content_type: String,
    },

    /// The body is not a JSON object.
    #[error("Failed to decode webhook body")]
    MalformedBody {
        /// The parse failure, if the body was not JSON at all.
        #[source]
        source: Option<serde_json::Error>,
    },
}

// Verify WebhookValidationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookValidationError>();
};
