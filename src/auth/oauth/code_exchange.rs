//! Grant code exchange.
//!
//! After [`validate_authorization_request`](crate::auth::oauth::validate_authorization_request)
//! accepts a redirect, its grant code is traded for an access token by
//! POSTing `{client_id, client_secret, code}` to `/admin/oauth/access_token`
//! on the shop.

use serde_json::json;

use crate::auth::oauth::authorization::{AuthorizationRequest, AuthorizationResponse};
use crate::auth::oauth::error::AuthorizationError;
use crate::clients::{HttpMethod, Transport, TransportRequest};
use crate::config::ApiCredentials;

/// Path of Shopify's token endpoint.
pub const ACCESS_TOKEN_PATH: &str = "/admin/oauth/access_token";

/// Exchanges a validated grant code for an access token.
///
/// Performs exactly one transport call. Scopes are not checked here; see
/// [`PublicApp::authorize_application`](crate::auth::oauth::PublicApp::authorize_application)
/// for the variant that also verifies required scopes.
///
/// # Errors
///
/// - [`AuthorizationError::ExchangeFailed`] if the transport fails or Shopify
///   answers with a non-2xx status (the status is kept)
/// - [`AuthorizationError::MalformedResponse`] if the response lacks a token
///   or scopes
pub async fn authorize_application(
    transport: &dyn Transport,
    credentials: &ApiCredentials,
    request: &AuthorizationRequest,
) -> Result<AuthorizationResponse, AuthorizationError> {
    let shop = request.shop();
    tracing::debug!(shop = %shop, "Exchanging OAuth grant code");

    let client_id: &str = credentials.api_key().as_ref();
    let client_secret: &str = credentials.api_secret_key().as_ref();
    let body = json!({
        "client_id": client_id,
        "client_secret": client_secret,
        "code": request.code(),
    });

    let transport_request =
        TransportRequest::builder(HttpMethod::Post, shop.shop_url(), ACCESS_TOKEN_PATH)
            .body(body)
            .build();

    let response = transport.call(transport_request).await?;

    let parsed_body = response
        .parsed_body
        .ok_or_else(|| AuthorizationError::MalformedResponse {
            reason: "response body is not JSON".to_string(),
        })?;

    let authorization = AuthorizationResponse::from_json(&parsed_body)?;
    tracing::debug!(shop = %shop, online = authorization.is_online(), "OAuth grant code exchanged");

    Ok(authorization)
}
