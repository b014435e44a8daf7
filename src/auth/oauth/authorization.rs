//! Values produced by the authorization handshake.
//!
//! - [`AuthorizationRequest`]: a redirect that passed validation
//! - [`AuthorizationResponse`]: the outcome of exchanging its grant code

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::auth::oauth::error::AuthorizationError;
use crate::auth::{AssociatedUser, Scopes};
use crate::config::{AccessToken, ShopDomain};

/// A validated OAuth redirect: the shop and its one-time grant code.
///
/// Only produced by
/// [`validate_authorization_request`](crate::auth::oauth::validate_authorization_request).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
    shop: ShopDomain,
    code: String,
}

impl AuthorizationRequest {
    pub(crate) const fn new(shop: ShopDomain, code: String) -> Self {
        Self { shop, code }
    }

    /// Returns the shop that authorized the app.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the grant code to exchange.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

#[derive(Deserialize)]
struct RawExchangeResponse {
    access_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<i64>,
    associated_user_scope: Option<String>,
    associated_user: Option<AssociatedUser>,
}

/// The result of a successful code exchange.
///
/// Offline grants carry only the token and scopes. Online grants also carry
/// an expiry, the user's scopes and the user.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::AuthorizationResponse;
/// use serde_json::json;
///
/// let response = AuthorizationResponse::from_json(&json!({
///     "access_token": "shpat_abc",
///     "scope": "write_orders,read_customers"
/// })).unwrap();
///
/// assert_eq!(response.access_token().as_ref(), "shpat_abc");
/// assert!(response.scopes().contains("read_customers"));
/// assert!(!response.is_online());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationResponse {
    access_token: AccessToken,
    scopes: Scopes,
    expires_at: Option<DateTime<Utc>>,
    associated_user_scope: Option<Scopes>,
    associated_user: Option<AssociatedUser>,
}

// Verify authorization types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationRequest>();
    assert_send_sync::<AuthorizationResponse>();
};

impl AuthorizationResponse {
    /// Builds a response from the parsed body of `/admin/oauth/access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::MalformedResponse`] if the body is not an
    /// object, if `access_token` is missing or empty, or if `scope` is missing
    /// or holds no valid scopes.
    pub fn from_json(body: &serde_json::Value) -> Result<Self, AuthorizationError> {
        if !body.is_object() {
            return Err(malformed("expected a JSON object"));
        }
        let raw: RawExchangeResponse =
            serde_json::from_value(body.clone()).map_err(|e| malformed(e.to_string()))?;

        let access_token = raw
            .access_token
            .ok_or_else(|| malformed("missing access_token"))
            .and_then(|token| AccessToken::new(token).map_err(|e| malformed(e.to_string())))?;

        let scopes = raw
            .scope
            .ok_or_else(|| malformed("missing scope"))?
            .parse::<Scopes>()
            .map_err(|e| malformed(e.to_string()))?;

        let associated_user_scope = match raw.associated_user_scope {
            Some(scope) => Some(
                scope
                    .parse::<Scopes>()
                    .map_err(|e| malformed(e.to_string()))?,
            ),
            None => None,
        };

        let expires_at = match raw.expires_in {
            Some(seconds) => Some(
                Duration::try_seconds(seconds)
                    .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
                    .ok_or_else(|| malformed("expires_in out of range"))?,
            ),
            None => None,
        };

        Ok(Self {
            access_token,
            scopes,
            expires_at,
            associated_user_scope,
            associated_user: raw.associated_user,
        })
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the scopes granted to the app.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns when an online token expires.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the scopes granted to the user of an online token.
    #[must_use]
    pub const fn associated_user_scope(&self) -> Option<&Scopes> {
        self.associated_user_scope.as_ref()
    }

    /// Returns the user of an online token.
    #[must_use]
    pub const fn associated_user(&self) -> Option<&AssociatedUser> {
        self.associated_user.as_ref()
    }

    /// Returns `true` for an online (per-user) grant.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.associated_user.is_some()
    }

    /// Returns `true` once an online token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() > expires_at)
    }
}

fn malformed(reason: impl Into<String>) -> AuthorizationError {
    AuthorizationError::MalformedResponse {
        reason: reason.into(),
    }
}
