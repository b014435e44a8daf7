//! reqwest-backed [`Transport`] implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::transport::{HttpMethod, Transport, TransportRequest, TransportResponse};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// [`Transport`] built on a shared `reqwest::Client`.
///
/// - Adds `User-Agent` and `Accept: application/json` unless the request
///   already sets them
/// - Sends bodies as JSON
/// - Reports non-2xx responses as [`TransportError::Response`]
/// - Performs no retries and sets no timeout of its own
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopify_app_auth::clients::ReqwestTransport;
///
/// let transport = Arc::new(ReqwestTransport::new()?);
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    user_agent: String,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client))
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        Self {
            client,
            user_agent: format!("Shopify App Auth Library v{SDK_VERSION} | Rust {rust_version}"),
        }
    }

    /// Prefixes the `User-Agent` header, e.g. `MyApp/1.0 | Shopify App Auth Library v0.1.0`.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: &str) -> Self {
        self.user_agent = format!("{prefix} | {}", self.user_agent);
        self
    }

    /// Returns the `User-Agent` header value sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = request.url();

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        let has_header = |name: &str| request.headers.keys().any(|k| k.eq_ignore_ascii_case(name));
        if !has_header("user-agent") {
            req_builder = req_builder.header("User-Agent", &self.user_agent);
        }
        if !has_header("accept") {
            req_builder = req_builder.header("Accept", "application/json");
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            if !has_header("content-type") {
                req_builder = req_builder.header("Content-Type", "application/json");
            }
            req_builder = req_builder.body(serde_json::to_vec(body)?);
        }

        let res = req_builder.send().await?;

        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let raw_body = res.bytes().await?.to_vec();

        if let Some(reason) = headers
            .get("x-shopify-api-deprecated-reason")
            .and_then(|values| values.first())
        {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.path,
                reason
            );
        }

        if !(200..=299).contains(&status) {
            tracing::debug!(status, path = %request.path, "Shopify request failed");
            return Err(TransportError::Response {
                status,
                body: String::from_utf8_lossy(&raw_body).into_owned(),
            });
        }

        Ok(TransportResponse::new(status, headers, raw_body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_header_format() {
        let transport = ReqwestTransport::with_client(reqwest::Client::new());
        assert!(transport.user_agent().contains("Shopify App Auth Library v"));
        assert!(transport.user_agent().contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let transport =
            ReqwestTransport::with_client(reqwest::Client::new()).user_agent_prefix("MyApp/1.0");
        assert!(transport.user_agent().starts_with("MyApp/1.0 | "));
        assert!(transport.user_agent().contains("Shopify App Auth Library"));
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestTransport>();
    }
}
