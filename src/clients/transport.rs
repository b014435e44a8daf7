//! The transport abstraction used for every outbound call.
//!
//! The library never talks to the network directly. Code exchanges and API
//! calls are expressed as a [`TransportRequest`] and handed to a
//! [`Transport`], which returns the status, headers, raw body bytes and the
//! parsed JSON body. [`ReqwestTransport`](crate::clients::ReqwestTransport)
//! is the bundled implementation.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::clients::errors::TransportError;

/// HTTP methods supported by the Shopify API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be sent by a [`Transport`].
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::clients::{HttpMethod, TransportRequest};
/// use serde_json::json;
///
/// let request = TransportRequest::builder(
///     HttpMethod::Post,
///     "https://my-store.myshopify.com",
///     "/admin/oauth/access_token",
/// )
/// .body(json!({"code": "abc"}))
/// .build();
///
/// assert_eq!(request.url(), "https://my-store.myshopify.com/admin/oauth/access_token");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// Scheme and host, e.g. `https://my-store.myshopify.com`.
    pub base_url: String,
    /// Absolute path on the host, e.g. `/admin/oauth/access_token`.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl TransportRequest {
    /// Creates a new builder for a request against `base_url` + `path`.
    #[must_use]
    pub fn builder(
        method: HttpMethod,
        base_url: impl Into<String>,
        path: impl Into<String>,
    ) -> TransportRequestBuilder {
        TransportRequestBuilder {
            request: Self {
                method,
                base_url: base_url.into(),
                path: path.into(),
                query: Vec::new(),
                headers: HashMap::new(),
                body: None,
            },
        }
    }

    /// Returns the full URL without the query string.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}

/// Builder for constructing [`TransportRequest`] instances.
#[derive(Debug)]
pub struct TransportRequestBuilder {
    request: TransportRequest,
}

impl TransportRequestBuilder {
    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters.
    #[must_use]
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request
            .query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    /// Sets several headers.
    #[must_use]
    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.request
            .headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Finishes the request.
    #[must_use]
    pub fn build(self) -> TransportRequest {
        self.request
    }
}

/// A response returned by a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The unmodified response body.
    pub raw_body: Vec<u8>,
    /// The body parsed as JSON, when it was non-empty valid JSON.
    pub parsed_body: Option<serde_json::Value>,
}

impl TransportResponse {
    /// Creates a response, parsing `raw_body` as JSON when possible.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, raw_body: Vec<u8>) -> Self {
        let parsed_body = if raw_body.is_empty() {
            None
        } else {
            serde_json::from_slice(&raw_body).ok()
        };
        Self {
            status,
            headers,
            raw_body,
            parsed_body,
        }
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Sends HTTP requests on behalf of the library.
///
/// Implementations must:
/// - return [`TransportError::Response`] for non-2xx statuses,
/// - keep the raw body bytes unmodified,
/// - lower-case header names in [`TransportResponse::headers`].
///
/// Timeouts, retries and cancellation are the implementation's concern.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends the request and returns the response.
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
