//! OAuth authorization code grant for public Shopify apps.
//!
//! The handshake runs in three steps:
//!
//! 1. **Authorization URL** ([`authorization_url`]): send the merchant to the
//!    shop's `/admin/oauth/authorize` page with the requested scopes, the
//!    redirect URI and a fresh [`Nonce`].
//! 2. **Redirect validation** ([`validate_authorization_request`]): when
//!    Shopify redirects back, check the grant code, the nonce echoed as
//!    `state`, the shop domain and the HMAC signature.
//! 3. **Code exchange** ([`authorize_application`]): trade the grant code for
//!    an access token.
//!
//! [`PublicApp`] bundles these steps with a fixed redirect URL and a scope
//! policy that rejects grants missing a required scope.
//!
//! # Security
//!
//! - Signatures are HMAC-SHA256 over the sorted, escaped redirect parameters
//! - HMAC and nonce comparisons are constant-time
//! - The nonce is 15 alphanumeric characters from a thread-local CSPRNG
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app_auth::auth::oauth::{Nonce, RequestParams};
//!
//! let nonce = Nonce::generate();
//! let redirect_url = "https://app.example.com/cb";
//! let url = shopify.authorization_url(&shop, &scopes, redirect_url, &nonce, false);
//! // store the nonce in the session and redirect the merchant to `url`
//!
//! // in the callback handler
//! let params = RequestParams::from_query_string(query);
//! let request = shopify.validate_authorization_request(&params, &stored_nonce, Some(&shop))?;
//! let response = shopify.authorize_application(&request).await?;
//! ```

mod authorization;
mod authorize_url;
mod code_exchange;
mod error;
pub mod hmac;
mod nonce;
mod public_app;
mod request_params;
mod validate_request;

pub use authorization::{AuthorizationRequest, AuthorizationResponse};
pub use authorize_url::{authorization_url, AUTHORIZE_PATH};
pub use code_exchange::{authorize_application, ACCESS_TOKEN_PATH};
pub use error::AuthorizationError;
pub use nonce::Nonce;
pub use public_app::{verify_granted_scopes, PublicApp, PublicAppBuilder};
pub use request_params::{RequestData, RequestParams};
pub use validate_request::{
    validate_authorization_request, validate_secured_request, validate_shop_request,
};
