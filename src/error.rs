//! Validation errors for value types.
//!
//! Shop domains, credentials and scope sets are validated when they are
//! constructed. Construction never yields a half-valid value: it either
//! returns the value or a [`ValidationError`] describing what was wrong.
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{ApiKey, ValidationError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ValidationError::EmptyCredential { .. })));
//! ```

use thiserror::Error;

/// Errors raised while constructing validated value types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not a `<shop>.myshopify.com` domain.
    #[error("Invalid shop domain: \"{domain}\". Expected format: 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The rejected input.
        domain: String,
    },

    /// The bare shop name is empty or contains whitespace.
    #[error("Invalid shop name: \"{name}\".")]
    InvalidShopName {
        /// The rejected input.
        name: String,
    },

    /// A credential was constructed from an empty string.
    #[error("Empty {kind}.")]
    EmptyCredential {
        /// Which credential was empty (e.g. "API key").
        kind: &'static str,
    },

    /// A scope set would contain no scopes.
    #[error("Scopes cannot be empty.")]
    EmptyScopes,

    /// A single scope entry is malformed.
    #[error("Invalid scope: \"{scope}\".")]
    InvalidScope {
        /// The offending scope string.
        scope: String,
    },

    /// Required and optional scopes of a public app share entries.
    #[error("Required and optional scopes must be disjoint sets (required: {required}, optional: {optional})")]
    OverlappingScopes {
        /// The required scopes in canonical form.
        required: String,
        /// The optional scopes in canonical form.
        optional: String,
    },

    /// A builder was finished without a required field.
    #[error("Missing required field: '{field}'.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

// Verify ValidationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidationError>();
};
