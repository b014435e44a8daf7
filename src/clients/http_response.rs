//! API responses with call-budget accounting.
//!
//! Shopify reports rate-limit usage differently per API:
//!
//! - REST: the `X-Shopify-Shop-Api-Call-Limit` header, formatted `made/limit`;
//!   each call costs 1.
//! - GraphQL: `extensions.cost` in the body, with `actualQueryCost` and
//!   `throttleStatus.{maximumAvailable,currentlyAvailable}`.
//!
//! This module only surfaces those numbers; it never throttles.

use serde_json::Value;

/// The REST call-limit header name.
pub const HEADER_API_CALL_LIMIT: &str = "X-Shopify-Shop-Api-Call-Limit";

/// Call-budget numbers reported with a response.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::clients::CallBudget;
///
/// let budget = CallBudget::from_call_limit_header("2/40").unwrap();
/// assert_eq!(budget.calls_made, 2);
/// assert_eq!(budget.call_limit, 40);
/// assert_eq!(budget.cost, 1);
/// assert_eq!(budget.calls_remaining(), 38);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallBudget {
    /// Calls (or cost points) consumed in the current bucket.
    pub calls_made: u64,
    /// Size of the bucket.
    pub call_limit: u64,
    /// Cost of the call that produced this response.
    pub cost: u64,
}

impl CallBudget {
    /// Parses a REST `made/limit` header value.
    ///
    /// Returns `None` unless the value is exactly two decimal numbers
    /// separated by a slash.
    #[must_use]
    pub fn from_call_limit_header(header_value: &str) -> Option<Self> {
        let (made, limit) = header_value.split_once('/')?;
        Some(Self {
            calls_made: parse_digits(made)?,
            call_limit: parse_digits(limit)?,
            cost: 1,
        })
    }

    /// Reads the GraphQL cost extension from a response body.
    ///
    /// Returns `None` unless `actualQueryCost`, `maximumAvailable` and
    /// `currentlyAvailable` are all present. Calls made is derived as
    /// `maximumAvailable - currentlyAvailable`.
    #[must_use]
    pub fn from_graphql_extensions(body: &Value) -> Option<Self> {
        let cost = body.pointer("/extensions/cost")?;
        let actual_cost = as_count(cost.get("actualQueryCost")?)?;
        let throttle = cost.get("throttleStatus")?;
        let maximum = as_count(throttle.get("maximumAvailable")?)?;
        let available = as_count(throttle.get("currentlyAvailable")?)?;

        Some(Self {
            calls_made: maximum.saturating_sub(available),
            call_limit: maximum,
            cost: actual_cost,
        })
    }

    /// Returns how much of the bucket is left.
    #[must_use]
    pub const fn calls_remaining(&self) -> u64 {
        self.call_limit.saturating_sub(self.calls_made)
    }
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// GraphQL reports throttle numbers as floats (e.g. 1000.0); truncate like an int cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

/// A response from the Shopify API.
///
/// Carries the status, the raw body, the parsed body and, when the upstream
/// response reported one, the [`CallBudget`]. A response without a budget is
/// "unlimited".
#[derive(Clone, Debug, PartialEq)]
pub struct ShopifyResponse {
    status: u16,
    raw_body: Vec<u8>,
    parsed_body: Value,
    call_budget: Option<CallBudget>,
}

impl ShopifyResponse {
    /// Creates a response without budget information.
    #[must_use]
    pub const fn unlimited(status: u16, raw_body: Vec<u8>, parsed_body: Value) -> Self {
        Self {
            status,
            raw_body,
            parsed_body,
            call_budget: None,
        }
    }

    /// Creates a response with budget information.
    #[must_use]
    pub const fn limited(
        status: u16,
        raw_body: Vec<u8>,
        parsed_body: Value,
        call_budget: CallBudget,
    ) -> Self {
        Self {
            status,
            raw_body,
            parsed_body,
            call_budget: Some(call_budget),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the unmodified response body.
    #[must_use]
    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// Returns the parsed body (`{}` when the body was empty or not JSON).
    #[must_use]
    pub const fn parsed_body(&self) -> &Value {
        &self.parsed_body
    }

    /// Returns the call budget, or `None` for unlimited responses.
    #[must_use]
    pub const fn call_budget(&self) -> Option<CallBudget> {
        self.call_budget
    }

    /// Returns `true` when no budget was reported.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.call_budget.is_none()
    }

    /// Calls made in the current bucket.
    #[must_use]
    pub fn calls_made(&self) -> Option<u64> {
        self.call_budget.map(|b| b.calls_made)
    }

    /// Size of the current bucket.
    #[must_use]
    pub fn call_limit(&self) -> Option<u64> {
        self.call_budget.map(|b| b.call_limit)
    }

    /// Cost of this call.
    #[must_use]
    pub fn cost(&self) -> Option<u64> {
        self.call_budget.map(|b| b.cost)
    }

    /// Remaining budget in the current bucket.
    #[must_use]
    pub fn calls_remaining(&self) -> Option<u64> {
        self.call_budget.map(|b| b.calls_remaining())
    }
}
