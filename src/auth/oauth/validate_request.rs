//! Validation of inbound OAuth redirects.
//!
//! Shopify redirects the merchant back to the app with `shop`, `code`,
//! `state`, `timestamp` and `hmac` query fields (plus whatever else Shopify
//! chooses to sign). Three checks build on each other:
//!
//! 1. [`validate_shop_request`]: the `shop` field is a valid shop domain
//! 2. [`validate_secured_request`]: the `hmac` field signs the other fields
//! 3. [`validate_authorization_request`]: the redirect carries a grant code,
//!    echoes the expected nonce, is signed, and names the expected shop
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::hmac::{compute_signature, redirect_signable_string};
//! use shopify_app_auth::auth::oauth::{validate_authorization_request, Nonce, RequestParams};
//! use shopify_app_auth::ApiSecretKey;
//!
//! let secret = ApiSecretKey::new("hush").unwrap();
//! let fields = [("shop", "x.myshopify.com"), ("code", "abc"), ("state", "n1")];
//! let hmac = compute_signature(&redirect_signable_string(fields), "hush");
//!
//! let mut pairs = fields.to_vec();
//! pairs.push(("hmac", hmac.as_str()));
//! let params = RequestParams::from_pairs(pairs);
//!
//! let request =
//!     validate_authorization_request(&secret, &params, &Nonce::from_raw("n1"), None).unwrap();
//! assert_eq!(request.shop().as_ref(), "x.myshopify.com");
//! assert_eq!(request.code(), "abc");
//! ```

use crate::auth::oauth::authorization::AuthorizationRequest;
use crate::auth::oauth::error::AuthorizationError;
use crate::auth::oauth::hmac::{
    compute_signature, constant_time_compare, redirect_signable_string, HMAC_FIELD,
};
use crate::auth::oauth::nonce::Nonce;
use crate::auth::oauth::request_params::RequestData;
use crate::config::{ApiSecretKey, ShopDomain};
use crate::error::ValidationError;

/// Reads and validates the `shop` field.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidShopDomain`] if the field is missing or
/// is not a `<shop>.myshopify.com` domain.
pub fn validate_shop_request<R: RequestData + ?Sized>(
    data: &R,
) -> Result<ShopDomain, ValidationError> {
    let shop = data
        .field("shop")
        .ok_or_else(|| ValidationError::InvalidShopDomain {
            domain: String::new(),
        })?;
    ShopDomain::new(shop)
}

/// Verifies the redirect signature and returns the signing shop.
///
/// # Errors
///
/// - [`AuthorizationError::InvalidShop`] if the `shop` field is missing or invalid
/// - [`AuthorizationError::MissingField`] if there is no `hmac` field
/// - [`AuthorizationError::HmacMismatch`] if the signature does not match
pub fn validate_secured_request<R: RequestData + ?Sized>(
    secret: &ApiSecretKey,
    data: &R,
) -> Result<ShopDomain, AuthorizationError> {
    let shop =
        validate_shop_request(data).map_err(|source| AuthorizationError::InvalidShop { source })?;

    let provided = data
        .field(HMAC_FIELD)
        .ok_or(AuthorizationError::MissingField { field: HMAC_FIELD })?;

    let signable = redirect_signable_string(data.pairs());
    let computed = compute_signature(&signable, secret.as_ref());

    if !constant_time_compare(&computed, provided) {
        tracing::warn!(shop = %shop, "OAuth redirect HMAC verification failed");
        return Err(AuthorizationError::HmacMismatch {
            provided: provided.to_string(),
            computed,
        });
    }

    Ok(shop)
}

/// Validates the redirect that ends the merchant's approval step.
///
/// Checks run in this order: non-empty `code`, `state` equal to `nonce`,
/// signature (see [`validate_secured_request`]), and, when `expected_shop` is
/// given, that the redirect names that shop.
///
/// An empty `nonce` accepts an empty `state` and gives no CSRF protection.
///
/// # Errors
///
/// - [`AuthorizationError::InvalidGrantCode`] if `code` is missing or empty
/// - [`AuthorizationError::NonceMismatch`] if `state` differs from `nonce`
/// - any error of [`validate_secured_request`]
/// - [`AuthorizationError::ShopMismatch`] if the shop is not `expected_shop`
pub fn validate_authorization_request<R: RequestData + ?Sized>(
    secret: &ApiSecretKey,
    data: &R,
    nonce: &Nonce,
    expected_shop: Option<&ShopDomain>,
) -> Result<AuthorizationRequest, AuthorizationError> {
    let code = match data.field("code") {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Err(AuthorizationError::InvalidGrantCode),
    };

    match data.field("state") {
        Some(state) if nonce.matches(state) => {}
        _ => return Err(AuthorizationError::NonceMismatch),
    }

    let shop = validate_secured_request(secret, data)?;

    if let Some(expected) = expected_shop {
        if expected != &shop {
            return Err(AuthorizationError::ShopMismatch {
                provided: shop.to_string(),
                expected: expected.to_string(),
            });
        }
    }

    Ok(AuthorizationRequest::new(shop, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::request_params::RequestParams;

    const SECRET: &str = "test-secret";

    fn secret() -> ApiSecretKey {
        ApiSecretKey::new(SECRET).unwrap()
    }

    fn signed(fields: &[(&str, &str)]) -> RequestParams {
        let hmac = compute_signature(&redirect_signable_string(fields.iter().copied()), SECRET);
        let mut pairs: Vec<(String, String)> = fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        pairs.push(("hmac".to_string(), hmac));
        RequestParams::from_pairs(pairs)
    }

    fn callback() -> RequestParams {
        signed(&[
            ("shop", "x.myshopify.com"),
            ("code", "abc"),
            ("state", "n1"),
            ("timestamp", "1337178173"),
        ])
    }

    #[test]
    fn test_validate_shop_request() {
        let params = RequestParams::from_pairs([("shop", "x.myshopify.com")]);
        assert_eq!(
            validate_shop_request(&params).unwrap().as_ref(),
            "x.myshopify.com"
        );

        let missing = RequestParams::default();
        assert!(matches!(
            validate_shop_request(&missing),
            Err(ValidationError::InvalidShopDomain { .. })
        ));

        let invalid = RequestParams::from_pairs([("shop", "x.example.com")]);
        assert!(validate_shop_request(&invalid).is_err());
    }

    #[test]
    fn test_secured_request_accepts_valid_signature() {
        let shop = validate_secured_request(&secret(), &callback()).unwrap();
        assert_eq!(shop.as_ref(), "x.myshopify.com");
    }

    #[test]
    fn test_secured_request_checks_shop_before_hmac() {
        let params = RequestParams::from_pairs([("shop", "nope")]);
        let error = validate_secured_request(&secret(), &params).unwrap_err();
        assert!(matches!(error, AuthorizationError::InvalidShop { .. }));
    }

    #[test]
    fn test_secured_request_requires_hmac() {
        let params = RequestParams::from_pairs([("shop", "x.myshopify.com"), ("code", "abc")]);
        let error = validate_secured_request(&secret(), &params).unwrap_err();
        assert!(matches!(
            error,
            AuthorizationError::MissingField { field: "hmac" }
        ));
        assert_eq!(
            error.to_string(),
            "The provided request data is missing one of the following keys: hmac"
        );
    }

    #[test]
    fn test_secured_request_rejects_tampered_field() {
        let mut pairs: Vec<(String, String)> = callback()
            .pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (key, value) in &mut pairs {
            if key == "code" {
                *value = "abd".to_string();
            }
        }
        let tampered = RequestParams::from_pairs(pairs);

        let error = validate_secured_request(&secret(), &tampered).unwrap_err();
        assert!(matches!(error, AuthorizationError::HmacMismatch { .. }));
    }

    #[test]
    fn test_secured_request_rejects_flipped_hmac() {
        let params = callback();
        let hmac = params.get("hmac").unwrap();
        let flipped = if hmac.starts_with('0') {
            format!("1{}", &hmac[1..])
        } else {
            format!("0{}", &hmac[1..])
        };
        let mut tampered: Vec<(&str, &str)> = params
            .pairs()
            .into_iter()
            .filter(|(k, _)| *k != "hmac")
            .collect();
        tampered.push(("hmac", flipped.as_str()));

        let error =
            validate_secured_request(&secret(), &RequestParams::from_pairs(tampered)).unwrap_err();
        match error {
            AuthorizationError::HmacMismatch { provided, computed } => {
                assert_eq!(provided, flipped);
                assert_eq!(computed, hmac);
            }
            other => panic!("Expected HmacMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_secured_request_rejects_wrong_secret() {
        let other = ApiSecretKey::new("other-secret").unwrap();
        let error = validate_secured_request(&other, &callback()).unwrap_err();
        assert!(matches!(error, AuthorizationError::HmacMismatch { .. }));
    }

    #[test]
    fn test_signature_covers_escaped_values() {
        let params = signed(&[
            ("shop", "x.myshopify.com"),
            ("code", "abc"),
            ("state", "n1"),
            ("host", "a&b%c"),
        ]);
        assert!(validate_secured_request(&secret(), &params).is_ok());
    }

    #[test]
    fn test_ampersand_is_signed_as_double_escaped() {
        let hmac = compute_signature("host=a%2526b&shop=x.myshopify.com", SECRET);
        let params = RequestParams::from_pairs([
            ("shop", "x.myshopify.com"),
            ("host", "a&b"),
            ("hmac", hmac.as_str()),
        ]);
        assert!(validate_secured_request(&secret(), &params).is_ok());

        let single = compute_signature("host=a%26b&shop=x.myshopify.com", SECRET);
        let params = RequestParams::from_pairs([
            ("shop", "x.myshopify.com"),
            ("host", "a&b"),
            ("hmac", single.as_str()),
        ]);
        assert!(validate_secured_request(&secret(), &params).is_err());
    }

    #[test]
    fn test_authorization_request_success() {
        let request =
            validate_authorization_request(&secret(), &callback(), &Nonce::from_raw("n1"), None)
                .unwrap();
        assert_eq!(request.shop().as_ref(), "x.myshopify.com");
        assert_eq!(request.code(), "abc");
    }

    #[test]
    fn test_authorization_request_requires_code() {
        let params = signed(&[("shop", "x.myshopify.com"), ("state", "n1")]);
        let error =
            validate_authorization_request(&secret(), &params, &Nonce::from_raw("n1"), None)
                .unwrap_err();
        assert!(matches!(error, AuthorizationError::InvalidGrantCode));

        let empty = signed(&[("shop", "x.myshopify.com"), ("code", ""), ("state", "n1")]);
        let error = validate_authorization_request(&secret(), &empty, &Nonce::from_raw("n1"), None)
            .unwrap_err();
        assert!(matches!(error, AuthorizationError::InvalidGrantCode));
    }

    #[test]
    fn test_authorization_request_rejects_wrong_nonce_even_when_signed() {
        let error =
            validate_authorization_request(&secret(), &callback(), &Nonce::from_raw("n2"), None)
                .unwrap_err();
        assert!(matches!(error, AuthorizationError::NonceMismatch));
    }

    #[test]
    fn test_authorization_request_rejects_missing_state() {
        let params = signed(&[("shop", "x.myshopify.com"), ("code", "abc")]);
        let error =
            validate_authorization_request(&secret(), &params, &Nonce::from_raw(""), None)
                .unwrap_err();
        assert!(matches!(error, AuthorizationError::NonceMismatch));
    }

    #[test]
    fn test_authorization_request_accepts_empty_nonce_and_state() {
        let params = signed(&[("shop", "x.myshopify.com"), ("code", "abc"), ("state", "")]);
        assert!(
            validate_authorization_request(&secret(), &params, &Nonce::from_raw(""), None).is_ok()
        );
    }

    #[test]
    fn test_nonce_checked_before_signature() {
        let params = RequestParams::from_pairs([
            ("shop", "x.myshopify.com"),
            ("code", "abc"),
            ("state", "n1"),
            ("hmac", "bogus"),
        ]);
        let error =
            validate_authorization_request(&secret(), &params, &Nonce::from_raw("n2"), None)
                .unwrap_err();
        assert!(matches!(error, AuthorizationError::NonceMismatch));
    }

    #[test]
    fn test_authorization_request_checks_expected_shop() {
        let expected = ShopDomain::new("y.myshopify.com").unwrap();
        let error = validate_authorization_request(
            &secret(),
            &callback(),
            &Nonce::from_raw("n1"),
            Some(&expected),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "The shop provided by Shopify (x.myshopify.com) does not match the shop provided to this API (y.myshopify.com)"
        );

        let matching = ShopDomain::new("x.myshopify.com").unwrap();
        assert!(validate_authorization_request(
            &secret(),
            &callback(),
            &Nonce::from_raw("n1"),
            Some(&matching)
        )
        .is_ok());
    }
}
