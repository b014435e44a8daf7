//! Validated newtype wrappers for credentials and shop domains.
//!
//! Each type validates its contents on construction and is immutable
//! afterwards. Invalid values are rejected with a [`ValidationError`].

use crate::error::ValidationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated Shopify API key (the app's client id).
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCredential`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty(key.into(), "API key").map(Self)
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated Shopify API secret key.
///
/// The secret signs OAuth redirects and webhook deliveries and is sent as
/// `client_secret` during the code exchange.
///
/// # Security
///
/// The `Debug` implementation masks the value as `ApiSecretKey(*****)`.
///
/// ```rust
/// use shopify_app_auth::ApiSecretKey;
///
/// let secret = ApiSecretKey::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ApiSecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new validated API secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCredential`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty(key.into(), "API secret key").map(Self)
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// A validated OAuth access token issued to a public app.
///
/// The `Debug` implementation masks the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCredential`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty(token.into(), "access token").map(Self)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

fn non_empty(value: String, kind: &'static str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyCredential { kind });
    }
    Ok(value)
}

/// A validated Shopify shop domain (`<shop>.myshopify.com`).
///
/// The shop name may contain any non-whitespace characters. Two domains are
/// equal when their shop names are equal.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::ShopDomain;
///
/// let domain = ShopDomain::new("my-store.myshopify.com").unwrap();
/// assert_eq!(domain.shop_name(), "my-store");
/// assert_eq!(domain.shop_url(), "https://my-store.myshopify.com");
///
/// let same = ShopDomain::from_shop_name("my-store").unwrap();
/// assert_eq!(domain, same);
///
/// assert!(ShopDomain::new("my-store").is_err());
/// assert!(ShopDomain::new("my store.myshopify.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Parses a full `<shop>.myshopify.com` domain.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidShopDomain`] if the suffix is missing,
    /// the shop name is empty, or the shop name contains whitespace.
    pub fn new(domain: impl Into<String>) -> Result<Self, ValidationError> {
        let domain = domain.into();
        match domain.strip_suffix(Self::SUFFIX) {
            Some(shop_name) if is_valid_shop_name(shop_name) => Ok(Self {
                shop_name_end: shop_name.len(),
                full_domain: domain,
            }),
            _ => Err(ValidationError::InvalidShopDomain { domain }),
        }
    }

    /// Builds a domain from a bare shop name by appending `.myshopify.com`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidShopName`] if the name is empty or
    /// contains whitespace.
    pub fn from_shop_name(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !is_valid_shop_name(&name) {
            return Err(ValidationError::InvalidShopName { name });
        }
        Ok(Self {
            shop_name_end: name.len(),
            full_domain: format!("{name}{}", Self::SUFFIX),
        })
    }

    /// Returns the shop name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    /// Returns the `https://` origin used for every outbound call to the shop.
    #[must_use]
    pub fn shop_url(&self) -> String {
        format!("https://{}", self.full_domain)
    }
}

fn is_valid_shop_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl FromStr for ShopDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

macro_rules! deserialize_validated {
    ($ty:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(de::Error::custom)
            }
        }
    };
}

deserialize_validated!(ApiKey);
deserialize_validated!(ApiSecretKey);
deserialize_validated!(AccessToken);
