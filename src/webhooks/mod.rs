//! Inbound webhook validation.
//!
//! This module only decides whether a delivery is authentic and well-formed.
//! Dispatching, queueing and retries are left to the caller.
//!
//! - [`WebhookValidator`]: checks headers, signature and body
//! - [`WebhookHeaders`]: what the validator reads from a request
//! - [`InboundWebhook`]: a ready-made [`WebhookHeaders`] implementation
//! - [`WebhookRequest`]: the validated delivery
//! - [`WebhookValidationError`]: why a delivery was rejected
//!
//! # Example
//!
//! ```rust,ignore
//! let validator = shopify.webhook_validator();
//!
//! match validator.validate(&delivery) {
//!     Ok(request) => handle(request.topic(), request.payload()),
//!     Err(error) => {
//!         // respond 401 and drop the delivery
//!     }
//! }
//! ```

mod errors;
mod verification;

pub use errors::WebhookValidationError;
pub use verification::{
    InboundWebhook, WebhookHeaders, WebhookRequest, WebhookValidator, HEADER_API_VERSION,
    HEADER_CONTENT_TYPE, HEADER_HMAC, HEADER_SHOP_DOMAIN, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};
