//! Webhook authenticity and shape verification.
//!
//! Shopify signs each webhook delivery with a base64 HMAC-SHA256 of the raw
//! body, keyed with the app's API secret. [`WebhookValidator`] checks the
//! delivery headers, verifies the signature over the exact body bytes and
//! decodes the JSON payload into a [`WebhookRequest`].
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::hmac::compute_signature_base64;
//! use shopify_app_auth::webhooks::{InboundWebhook, WebhookValidator};
//! use shopify_app_auth::ApiSecretKey;
//!
//! let body = br#"{"id":1}"#;
//! let webhook = InboundWebhook::new(body.to_vec())
//!     .with_header("X-Shopify-Shop-Domain", "my-store.myshopify.com")
//!     .with_header("X-Shopify-Topic", "orders/create")
//!     .with_header("X-Shopify-Hmac-SHA256", compute_signature_base64(body, "s3cr3t"))
//!     .with_header("Content-Type", "application/json");
//!
//! let validator = WebhookValidator::new(ApiSecretKey::new("s3cr3t").unwrap());
//! let request = validator.validate(&webhook).unwrap();
//! assert_eq!(request.topic(), "orders/create");
//! assert_eq!(request.payload()["id"], 1);
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::auth::oauth::hmac::{compute_signature_base64, constant_time_compare};
use crate::config::{ApiSecretKey, ShopDomain};
use crate::webhooks::WebhookValidationError;

/// HTTP header carrying the base64 HMAC-SHA256 of the body.
pub const HEADER_HMAC: &str = "X-Shopify-Hmac-SHA256";

/// HTTP header carrying the topic, e.g. `orders/create`.
pub const HEADER_TOPIC: &str = "X-Shopify-Topic";

/// HTTP header carrying the originating `*.myshopify.com` domain.
pub const HEADER_SHOP_DOMAIN: &str = "X-Shopify-Shop-Domain";

/// HTTP header carrying the API version of the payload.
pub const HEADER_API_VERSION: &str = "X-Shopify-API-Version";

/// HTTP header carrying the delivery's unique id.
pub const HEADER_WEBHOOK_ID: &str = "X-Shopify-Webhook-Id";

/// HTTP header declaring the body's media type.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

const JSON_MEDIA_TYPE: &str = "application/json";

/// What the validator needs from an inbound HTTP request.
///
/// Implement this for your web framework's request type, or use
/// [`InboundWebhook`].
pub trait WebhookHeaders {
    /// Returns the value of header `name`, matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Returns the raw, unparsed request body.
    fn body(&self) -> &[u8];
}

/// A framework-independent webhook delivery: headers plus raw body bytes.
///
/// Header names are case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct InboundWebhook {
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl InboundWebhook {
    /// Creates a delivery with the given raw body and no headers.
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Returns the value of header `name`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl WebhookHeaders for InboundWebhook {
    fn header(&self, name: &str) -> Option<&str> {
        Self::header(self, name)
    }

    fn body(&self) -> &[u8] {
        Self::body(self)
    }
}

/// An authentic, well-formed webhook delivery.
///
/// Only produced by [`WebhookValidator::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookRequest {
    webhook_id: Option<String>,
    api_version: Option<String>,
    shop_domain: ShopDomain,
    topic: String,
    payload: Map<String, Value>,
}

impl WebhookRequest {
    /// Returns the delivery id, if the header was present.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }

    /// Returns the payload's API version, if the header was present.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Returns the shop the delivery is about.
    #[must_use]
    pub const fn shop_domain(&self) -> &ShopDomain {
        &self.shop_domain
    }

    /// Returns the topic, e.g. `orders/create`.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the decoded JSON object.
    #[must_use]
    pub const fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Consumes the request and returns the decoded JSON object.
    #[must_use]
    pub fn into_payload(self) -> Map<String, Value> {
        self.payload
    }
}

/// Validates webhook deliveries against the app's API secret.
#[derive(Clone, Debug)]
pub struct WebhookValidator {
    secret: ApiSecretKey,
}

impl WebhookValidator {
    /// Creates a validator keyed with `secret`.
    #[must_use]
    pub const fn new(secret: ApiSecretKey) -> Self {
        Self { secret }
    }

    /// Checks that a delivery came from Shopify and carries a JSON object.
    ///
    /// Checks run in this order and stop at the first failure: shop domain,
    /// topic, signature header, content type header, signature, JSON content
    /// type, JSON object body.
    ///
    /// # Errors
    ///
    /// - [`WebhookValidationError::InvalidShopDomain`] if the shop header is
    ///   missing or invalid
    /// - [`WebhookValidationError::MissingHeader`] if the topic, signature or
    ///   content type header is missing or empty
    /// - [`WebhookValidationError::HmacMismatch`] if the signature does not
    ///   match the raw body
    /// - [`WebhookValidationError::UnsupportedContentType`] if the body is not
    ///   declared as JSON
    /// - [`WebhookValidationError::MalformedBody`] if the body is not a JSON object
    pub fn validate<W: WebhookHeaders + ?Sized>(
        &self,
        webhook: &W,
    ) -> Result<WebhookRequest, WebhookValidationError> {
        let shop_domain = ShopDomain::new(webhook.header(HEADER_SHOP_DOMAIN).unwrap_or_default())
            .map_err(|source| WebhookValidationError::InvalidShopDomain { source })?;
        let topic = required_header(webhook, HEADER_TOPIC)?;
        let provided = required_header(webhook, HEADER_HMAC)?;
        let content_type = required_header(webhook, HEADER_CONTENT_TYPE)?;

        let body = webhook.body();
        let computed = compute_signature_base64(body, self.secret.as_ref());
        if !constant_time_compare(provided, &computed) {
            tracing::warn!(
                shop = %shop_domain,
                topic,
                "Webhook HMAC verification failed"
            );
            return Err(WebhookValidationError::HmacMismatch {
                provided: provided.to_string(),
                computed,
            });
        }

        if !content_type.contains(JSON_MEDIA_TYPE) {
            return Err(WebhookValidationError::UnsupportedContentType {
                content_type: content_type.to_string(),
            });
        }

        let payload = match serde_json::from_slice(body) {
            Ok(Value::Object(payload)) => payload,
            Ok(_) => return Err(WebhookValidationError::MalformedBody { source: None }),
            Err(e) => return Err(WebhookValidationError::MalformedBody { source: Some(e) }),
        };

        Ok(WebhookRequest {
            webhook_id: optional_header(webhook, HEADER_WEBHOOK_ID),
            api_version: optional_header(webhook, HEADER_API_VERSION),
            shop_domain,
            topic: topic.to_string(),
            payload,
        })
    }
}

fn required_header<'a, W: WebhookHeaders + ?Sized>(
    webhook: &'a W,
    header: &'static str,
) -> Result<&'a str, WebhookValidationError> {
    webhook
        .header(header)
        .filter(|value| !value.is_empty())
        .ok_or(WebhookValidationError::MissingHeader { header })
}

fn optional_header<W: WebhookHeaders + ?Sized>(webhook: &W, header: &str) -> Option<String> {
    webhook
        .header(header)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
