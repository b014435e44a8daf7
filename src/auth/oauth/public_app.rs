//! A public app: fixed redirect URL plus required and optional scopes.
//!
//! [`PublicApp`] wraps a [`Shopify`] handle and adds the scope policy: the
//! authorization URL requests required and optional scopes together, and
//! [`PublicApp::authorize_application`] rejects grants that miss a required
//! scope.

use crate::auth::oauth::{
    AuthorizationError, AuthorizationRequest, AuthorizationResponse, Nonce, RequestData,
};
use crate::auth::{ScopeDifference, Scopes};
use crate::clients::{GraphqlClient, ShopifyClient};
use crate::config::{AccessToken, ApiKey, ShopDomain};
use crate::error::ValidationError;
use crate::shopify::Shopify;

/// A public app with its OAuth scope policy.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_app_auth::auth::oauth::{Nonce, PublicApp};
///
/// let app = PublicApp::builder()
///     .shopify(shopify)
///     .redirect_url("https://app.example.com/callback")
///     .required_scopes("read_products".parse()?)
///     .optional_scopes("read_orders".parse()?)
///     .build()?;
///
/// let nonce = Nonce::generate();
/// let url = app.authorization_url(&shop, &nonce, false);
///
/// // ... later, in the callback handler
/// let request = app.validate_authorization_request(&params, &nonce, Some(&shop))?;
/// let response = app.authorize_application(&request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PublicApp {
    shopify: Shopify,
    redirect_url: String,
    required_scopes: Scopes,
    optional_scopes: Option<Scopes>,
}

// Verify PublicApp is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PublicApp>();
};

impl PublicApp {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> PublicAppBuilder {
        PublicAppBuilder::new()
    }

    /// Returns the app's API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        self.shopify.api_key()
    }

    /// Returns the redirect URL sent with authorization requests.
    #[must_use]
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Returns the scopes every grant must include.
    #[must_use]
    pub const fn required_scopes(&self) -> &Scopes {
        &self.required_scopes
    }

    /// Returns the scopes requested but not enforced.
    #[must_use]
    pub const fn optional_scopes(&self) -> Option<&Scopes> {
        self.optional_scopes.as_ref()
    }

    /// Returns the scopes requested from the merchant: required ∪ optional.
    #[must_use]
    pub fn requested_scopes(&self) -> Scopes {
        match &self.optional_scopes {
            Some(optional) => self.required_scopes.with(optional),
            None => self.required_scopes.clone(),
        }
    }

    /// Reads and validates the `shop` field of a request.
    ///
    /// # Errors
    ///
    /// See [`Shopify::validate_shop_request`].
    pub fn validate_shop_request<R: RequestData + ?Sized>(
        &self,
        data: &R,
    ) -> Result<ShopDomain, ValidationError> {
        self.shopify.validate_shop_request(data)
    }

    /// Builds the authorization URL for all requested scopes.
    #[must_use]
    pub fn authorization_url(
        &self,
        shop: &ShopDomain,
        nonce: &Nonce,
        online_access: bool,
    ) -> String {
        self.shopify.authorization_url(
            shop,
            &self.requested_scopes(),
            &self.redirect_url,
            nonce,
            online_access,
        )
    }

    /// Verifies that a request was signed by Shopify.
    ///
    /// # Errors
    ///
    /// See [`Shopify::validate_secured_request`].
    pub fn validate_secured_request<R: RequestData + ?Sized>(
        &self,
        data: &R,
    ) -> Result<ShopDomain, AuthorizationError> {
        self.shopify.validate_secured_request(data)
    }

    /// Validates the redirect that ends the merchant's approval step.
    ///
    /// # Errors
    ///
    /// See [`Shopify::validate_authorization_request`].
    pub fn validate_authorization_request<R: RequestData + ?Sized>(
        &self,
        data: &R,
        nonce: &Nonce,
        expected_shop: Option<&ShopDomain>,
    ) -> Result<AuthorizationRequest, AuthorizationError> {
        self.shopify
            .validate_authorization_request(data, nonce, expected_shop)
    }

    /// Exchanges the grant code and checks that every required scope was granted.
    ///
    /// A granted `write_x` satisfies a required `read_x`.
    ///
    /// # Errors
    ///
    /// - any error of [`Shopify::authorize_application`]
    /// - [`AuthorizationError::ScopesNotGranted`] if a required scope is missing
    pub async fn authorize_application(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<AuthorizationResponse, AuthorizationError> {
        let response = self.shopify.authorize_application(request).await?;
        verify_granted_scopes(&self.required_scopes, response)
    }

    /// Creates a REST client authenticated with an OAuth access token.
    #[must_use]
    pub fn public_app_client(&self, shop: ShopDomain, access_token: AccessToken) -> ShopifyClient {
        self.shopify.public_app_client(shop, access_token)
    }

    /// Creates an Admin GraphQL client authenticated with an OAuth access token.
    #[must_use]
    pub fn public_app_graphql_client(
        &self,
        shop: ShopDomain,
        access_token: AccessToken,
    ) -> GraphqlClient {
        self.shopify.public_app_graphql_client(shop, access_token)
    }
}

/// Accepts `response` only if it grants every scope in `required`.
///
/// # Errors
///
/// Returns [`AuthorizationError::ScopesNotGranted`] listing the missing scopes.
pub fn verify_granted_scopes(
    required: &Scopes,
    response: AuthorizationResponse,
) -> Result<AuthorizationResponse, AuthorizationError> {
    match required.without(response.scopes()) {
        ScopeDifference::Satisfied => Ok(response),
        ScopeDifference::Missing(not_granted) => {
            tracing::warn!(
                required = %required,
                not_granted = %not_granted,
                "Merchant did not grant all required scopes"
            );
            Err(AuthorizationError::ScopesNotGranted {
                required: required.to_string(),
                not_granted: not_granted.to_string(),
            })
        }
    }
}

/// Builder for [`PublicApp`].
///
/// `shopify`, `redirect_url` and `required_scopes` are required.
#[derive(Debug, Default)]
pub struct PublicAppBuilder {
    shopify: Option<Shopify>,
    redirect_url: Option<String>,
    required_scopes: Option<Scopes>,
    optional_scopes: Option<Scopes>,
}

impl PublicAppBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Shopify handle (required).
    #[must_use]
    pub fn shopify(mut self, shopify: Shopify) -> Self {
        self.shopify = Some(shopify);
        self
    }

    /// Sets the redirect URL (required).
    #[must_use]
    pub fn redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Sets the required scopes (required).
    #[must_use]
    pub fn required_scopes(mut self, scopes: Scopes) -> Self {
        self.required_scopes = Some(scopes);
        self
    }

    /// Sets the optional scopes.
    #[must_use]
    pub fn optional_scopes(mut self, scopes: Scopes) -> Self {
        self.optional_scopes = Some(scopes);
        self
    }

    /// Builds the [`PublicApp`].
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingRequiredField`] if a required field is unset
    /// - [`ValidationError::OverlappingScopes`] if required and optional scopes intersect
    pub fn build(self) -> Result<PublicApp, ValidationError> {
        let shopify = self
            .shopify
            .ok_or(ValidationError::MissingRequiredField { field: "shopify" })?;
        let redirect_url = self
            .redirect_url
            .ok_or(ValidationError::MissingRequiredField {
                field: "redirect_url",
            })?;
        let required_scopes = self
            .required_scopes
            .ok_or(ValidationError::MissingRequiredField {
                field: "required_scopes",
            })?;

        if let Some(optional) = &self.optional_scopes {
            if required_scopes.has_any(optional) {
                return Err(ValidationError::OverlappingScopes {
                    required: required_scopes.to_string(),
                    optional: optional.to_string(),
                });
            }
        }

        Ok(PublicApp {
            shopify,
            redirect_url,
            required_scopes,
            optional_scopes: self.optional_scopes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::hmac::{compute_signature, redirect_signable_string};
    use crate::auth::oauth::RequestParams;
    use crate::clients::testing::RecordingTransport;
    use crate::config::{ApiCredentials, ApiSecretKey};
    use serde_json::json;
    use std::sync::Arc;

    fn shopify(grant: &str) -> Shopify {
        Shopify::new(
            Arc::new(RecordingTransport::json(
                200,
                json!({"access_token": "shpat_1", "scope": grant}),
            )),
            ApiCredentials::new(
                ApiKey::new("test-key").unwrap(),
                ApiSecretKey::new("test-secret").unwrap(),
            ),
        )
    }

    fn app(grant: &str) -> PublicApp {
        PublicApp::builder()
            .shopify(shopify(grant))
            .redirect_url("https://app.example.com/cb")
            .required_scopes("read_products,read_orders".parse().unwrap())
            .optional_scopes("read_customers".parse().unwrap())
            .build()
            .unwrap()
    }

    fn request(app: &PublicApp) -> AuthorizationRequest {
        let fields = [("shop", "x.myshopify.com"), ("code", "abc"), ("state", "n1")];
        let hmac = compute_signature(&redirect_signable_string(fields), "test-secret");
        let mut pairs = fields.to_vec();
        pairs.push(("hmac", hmac.as_str()));
        app.validate_authorization_request(
            &RequestParams::from_pairs(pairs),
            &Nonce::from_raw("n1"),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_builder_requires_fields() {
        let error = PublicApp::builder().build().unwrap_err();
        assert_eq!(
            error,
            ValidationError::MissingRequiredField { field: "shopify" }
        );

        let error = PublicApp::builder()
            .shopify(shopify("read_products"))
            .build()
            .unwrap_err();
        assert_eq!(
            error,
            ValidationError::MissingRequiredField {
                field: "redirect_url"
            }
        );
    }

    #[test]
    fn test_builder_rejects_overlapping_scopes() {
        let error = PublicApp::builder()
            .shopify(shopify("read_products"))
            .redirect_url("https://app.example.com/cb")
            .required_scopes("read_products,read_orders".parse().unwrap())
            .optional_scopes("read_orders,read_customers".parse().unwrap())
            .build()
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Required and optional scopes must be disjoint sets (required: read_orders,read_products, optional: read_customers,read_orders)"
        );
    }

    #[test]
    fn test_authorization_url_requests_required_and_optional() {
        let app = app("read_products");
        assert_eq!(
            app.requested_scopes().to_string(),
            "read_customers,read_orders,read_products"
        );

        let url = app.authorization_url(
            &ShopDomain::new("x.myshopify.com").unwrap(),
            &Nonce::from_raw("n1"),
            false,
        );
        assert!(url.contains("scope=read_customers%2Cread_orders%2Cread_products"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb"));
    }

    #[tokio::test]
    async fn test_authorize_accepts_full_grant() {
        let app = app("read_products,read_orders");
        let response = app.authorize_application(&request(&app)).await.unwrap();
        assert_eq!(response.access_token().as_ref(), "shpat_1");
    }

    #[tokio::test]
    async fn test_authorize_rejects_write_in_place_of_required_read() {
        let app = app("write_products,write_orders");
        let error = app.authorize_application(&request(&app)).await.unwrap_err();
        match error {
            AuthorizationError::ScopesNotGranted { not_granted, .. } => {
                assert_eq!(not_granted, "read_orders,read_products");
            }
            other => panic!("Expected ScopesNotGranted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authorize_rejects_missing_required_scope() {
        let app = app("read_products,read_customers");
        let error = app.authorize_application(&request(&app)).await.unwrap_err();
        match error {
            AuthorizationError::ScopesNotGranted {
                required,
                not_granted,
            } => {
                assert_eq!(required, "read_orders,read_products");
                assert_eq!(not_granted, "read_orders");
            }
            other => panic!("Expected ScopesNotGranted, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_granted_scopes_ignores_optional() {
        let required: Scopes = "read_products".parse().unwrap();
        let response = AuthorizationResponse::from_json(&json!({
            "access_token": "tok",
            "scope": "read_products"
        }))
        .unwrap();
        assert!(verify_granted_scopes(&required, response).is_ok());
    }

    #[test]
    fn test_verify_granted_scopes_does_not_expand_write_scopes() {
        let required: Scopes = "read_products".parse().unwrap();
        let response = AuthorizationResponse::from_json(&json!({
            "access_token": "tok",
            "scope": "write_products"
        }))
        .unwrap();
        assert!(matches!(
            verify_granted_scopes(&required, response),
            Err(AuthorizationError::ScopesNotGranted { .. })
        ));
    }
}
