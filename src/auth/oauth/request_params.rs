//! Read access to the query fields of an OAuth redirect.
//!
//! The validators only need two things from an inbound redirect: a single
//! field by name, and every (key, value) pair for the signature. The
//! [`RequestData`] trait captures exactly that, so any framework's query
//! representation can be validated without copying. [`RequestParams`] is the
//! bundled implementation.

use std::collections::{BTreeMap, HashMap};

/// The query fields of an inbound OAuth redirect.
pub trait RequestData {
    /// Returns the value of `name`, if present.
    fn field(&self, name: &str) -> Option<&str>;

    /// Returns every (key, value) pair, in any order.
    fn pairs(&self) -> Vec<(&str, &str)>;
}

/// An ordered list of redirect query fields.
///
/// When a key appears more than once, [`get`](Self::get) returns the last
/// occurrence and only that occurrence is signed.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::RequestParams;
///
/// let params = RequestParams::from_query_string(
///     "code=abc&shop=my-store.myshopify.com&state=n1&hmac=f00",
/// );
/// assert_eq!(params.get("shop"), Some("my-store.myshopify.com"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    /// Collects already-decoded (key, value) pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses a raw query string, with or without a leading `?`.
    ///
    /// Each key and value is percent-decoded once. `+` is kept as a literal
    /// plus sign. A segment without `=` becomes a key with an empty value.
    /// Segments that do not decode to UTF-8 are kept undecoded.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self { pairs }
    }

    /// Returns the last value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}

impl RequestData for RequestParams {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    fn pairs(&self) -> Vec<(&str, &str)> {
        // Last occurrence wins, matching `get`.
        let mut unique: BTreeMap<&str, &str> = BTreeMap::new();
        for (key, value) in &self.pairs {
            unique.insert(key.as_str(), value.as_str());
        }
        unique.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl RequestData for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn pairs(&self) -> Vec<(&str, &str)> {
        self.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

impl RequestData for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn pairs(&self) -> Vec<(&str, &str)> {
        self.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}
