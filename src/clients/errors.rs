//! Transport and API client error types.
//!
//! - [`TransportError`]: Failure reported by a [`Transport`](crate::clients::Transport)
//! - [`ClientError`]: Failure of a REST or GraphQL call made through
//!   [`ShopifyClient`](crate::clients::ShopifyClient) or
//!   [`GraphqlClient`](crate::clients::GraphqlClient)
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::clients::TransportError;
//!
//! let error = TransportError::Response {
//!     status: 401,
//!     body: r#"{"errors":"Invalid API key"}"#.to_string(),
//! };
//! assert_eq!(error.status(), Some(401));
//! ```

use thiserror::Error;

/// Error returned by a transport when a request cannot be completed.
///
/// Non-2xx responses are reported as [`TransportError::Response`] so callers
/// keep the upstream status code.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}: {body}")]
    Response {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body, lossily decoded as UTF-8.
        body: String,
    },

    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failure raised by a custom transport implementation.
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Returns the upstream HTTP status, when the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Encode(_) | Self::Other(_) => None,
        }
    }
}

/// Error returned by the REST and GraphQL API clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The GraphQL response carried a non-empty `errors` member.
    #[error("Shopify GraphQL request failed with errors: {errors}")]
    Graphql {
        /// The `errors` member of the response, as JSON.
        errors: serde_json::Value,
    },

    /// The GraphQL response had no `data` member.
    #[error("Shopify GraphQL client failed to recognize response data structure - missing data property")]
    MissingData,
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
    assert_send_sync::<ClientError>();
};
