//! The [`Shopify`] entry point.
//!
//! Bundles a [`Transport`] and the app's [`ApiCredentials`] so callers do not
//! have to pass them to every OAuth, client and webhook operation.

use std::sync::Arc;

use crate::auth::oauth::{
    self, AuthorizationError, AuthorizationRequest, AuthorizationResponse, Nonce, PublicApp,
    RequestData,
};
use crate::auth::Scopes;
use crate::clients::{
    private_app_auth_headers, public_app_auth_headers, GraphqlClient, ShopifyClient, Transport,
};
use crate::config::{AccessToken, ApiCredentials, ApiKey, ShopDomain};
use crate::error::ValidationError;
use crate::webhooks::WebhookValidator;

/// An app's handle on Shopify: its credentials plus the transport to use.
///
/// # Thread Safety
///
/// `Shopify` is `Send + Sync` and cheap to clone; the transport is shared.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopify_app_auth::clients::ReqwestTransport;
/// use shopify_app_auth::auth::oauth::{Nonce, RequestParams};
/// use shopify_app_auth::{ApiCredentials, ApiKey, ApiSecretKey, Shopify, ShopDomain};
///
/// let shopify = Shopify::new(
///     Arc::new(ReqwestTransport::new()?),
///     ApiCredentials::new(ApiKey::new("key")?, ApiSecretKey::new("secret")?),
/// );
///
/// // Step 1: send the merchant to Shopify
/// let nonce = Nonce::generate();
/// let url = shopify.authorization_url(
///     &ShopDomain::new("my-store.myshopify.com")?,
///     &"read_products".parse()?,
///     "https://app.example.com/callback",
///     &nonce,
///     false,
/// );
///
/// // Step 2: validate the redirect and exchange the code
/// let params = RequestParams::from_query_string(callback_query);
/// let request = shopify.validate_authorization_request(&params, &nonce, None)?;
/// let response = shopify.authorize_application(&request).await?;
///
/// // Step 3: call the API
/// let client = shopify.public_app_client(request.shop().clone(), response.access_token().clone());
/// ```
#[derive(Clone, Debug)]
pub struct Shopify {
    transport: Arc<dyn Transport>,
    credentials: ApiCredentials,
}

// Verify Shopify is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Shopify>();
};

impl Shopify {
    /// Creates a handle from a transport and the app's credentials.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, credentials: ApiCredentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Returns the app's API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        self.credentials.api_key()
    }

    /// Returns the app's credentials.
    #[must_use]
    pub const fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    /// Returns the shared transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Reads and validates the `shop` field of a request.
    ///
    /// # Errors
    ///
    /// See [`oauth::validate_shop_request`].
    pub fn validate_shop_request<R: RequestData + ?Sized>(
        &self,
        data: &R,
    ) -> Result<ShopDomain, ValidationError> {
        oauth::validate_shop_request(data)
    }

    /// Builds the URL that asks the merchant to install the app.
    #[must_use]
    pub fn authorization_url(
        &self,
        shop: &ShopDomain,
        scopes: &Scopes,
        redirect_url: &str,
        nonce: &Nonce,
        online_access: bool,
    ) -> String {
        oauth::authorization_url(
            self.api_key(),
            shop,
            scopes,
            redirect_url,
            nonce,
            online_access,
        )
    }

    /// Verifies that a request was signed by Shopify with this app's secret.
    ///
    /// # Errors
    ///
    /// See [`oauth::validate_secured_request`].
    pub fn validate_secured_request<R: RequestData + ?Sized>(
        &self,
        data: &R,
    ) -> Result<ShopDomain, AuthorizationError> {
        oauth::validate_secured_request(self.credentials.api_secret_key(), data)
    }

    /// Validates the redirect that ends the merchant's approval step.
    ///
    /// # Errors
    ///
    /// See [`oauth::validate_authorization_request`].
    pub fn validate_authorization_request<R: RequestData + ?Sized>(
        &self,
        data: &R,
        nonce: &Nonce,
        expected_shop: Option<&ShopDomain>,
    ) -> Result<AuthorizationRequest, AuthorizationError> {
        oauth::validate_authorization_request(
            self.credentials.api_secret_key(),
            data,
            nonce,
            expected_shop,
        )
    }

    /// Exchanges a validated grant code for an access token.
    ///
    /// # Errors
    ///
    /// See [`oauth::authorize_application`].
    pub async fn authorize_application(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<AuthorizationResponse, AuthorizationError> {
        oauth::authorize_application(self.transport.as_ref(), &self.credentials, request).await
    }

    /// Creates a REST client authenticated with an OAuth access token.
    #[must_use]
    pub fn public_app_client(&self, shop: ShopDomain, access_token: AccessToken) -> ShopifyClient {
        ShopifyClient::new(
            Arc::clone(&self.transport),
            shop,
            public_app_auth_headers(&access_token),
        )
    }

    /// Creates a REST client authenticated with the app's basic-auth credentials.
    #[must_use]
    pub fn private_app_client(&self, shop: ShopDomain) -> ShopifyClient {
        ShopifyClient::new(
            Arc::clone(&self.transport),
            shop,
            private_app_auth_headers(&self.credentials),
        )
    }

    /// Creates an Admin GraphQL client authenticated with an OAuth access token.
    #[must_use]
    pub fn public_app_graphql_client(
        &self,
        shop: ShopDomain,
        access_token: AccessToken,
    ) -> GraphqlClient {
        GraphqlClient::new(
            Arc::clone(&self.transport),
            shop,
            public_app_auth_headers(&access_token),
        )
    }

    /// Creates a [`PublicApp`] with a fixed redirect URL and scope requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OverlappingScopes`] if `optional_scopes`
    /// shares a scope with `required_scopes`.
    pub fn public_app(
        &self,
        redirect_url: impl Into<String>,
        required_scopes: Scopes,
        optional_scopes: Option<Scopes>,
    ) -> Result<PublicApp, ValidationError> {
        let mut builder = PublicApp::builder()
            .shopify(self.clone())
            .redirect_url(redirect_url)
            .required_scopes(required_scopes);
        if let Some(optional_scopes) = optional_scopes {
            builder = builder.optional_scopes(optional_scopes);
        }
        builder.build()
    }

    /// Creates a webhook validator keyed with the app's secret.
    #[must_use]
    pub fn webhook_validator(&self) -> WebhookValidator {
        WebhookValidator::new(self.credentials.api_secret_key().clone())
    }
}
