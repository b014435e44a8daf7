//! OAuth scope sets.
//!
//! This module provides the [`Scopes`] type, an immutable, non-empty set of
//! permission names, together with [`ScopeDifference`], the outcome of
//! subtracting one scope set from another.

use crate::error::ValidationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A non-empty set of OAuth scopes.
///
/// Scopes are case-sensitive and deduplicated. The canonical string form is
/// the sorted scopes joined with commas, which is also what `Display` and
/// `Serialize` produce.
///
/// Every operation returns a new value; a `Scopes` is never modified after
/// construction and is never empty.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::{Scopes, ScopeDifference};
///
/// let required: Scopes = "read_products, write_orders".parse().unwrap();
/// let granted: Scopes = "write_orders,read_products,read_customers".parse().unwrap();
///
/// assert_eq!(required.to_string(), "read_products,write_orders");
/// assert!(required.has_any(&granted));
/// assert_eq!(required.without(&granted), ScopeDifference::Satisfied);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scopes {
    scopes: BTreeSet<String>,
}

/// The result of [`Scopes::without`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeDifference {
    /// Every scope of the left-hand set is present in the right-hand set.
    Satisfied,
    /// The scopes of the left-hand set that the right-hand set lacks.
    Missing(Scopes),
}

impl ScopeDifference {
    /// Returns `true` when nothing is missing.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

impl Scopes {
    /// Builds a scope set from individual scope names.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScope`] if an entry is empty or
    /// contains whitespace or a comma, and [`ValidationError::EmptyScopes`]
    /// if no scopes are given.
    pub fn new<I, S>(scopes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for scope in scopes {
            let scope = scope.into();
            if scope.is_empty() || scope.chars().any(|c| c.is_whitespace() || c == ',') {
                return Err(ValidationError::InvalidScope { scope });
            }
            set.insert(scope);
        }
        Self::from_set(set)
    }

    fn from_set(scopes: BTreeSet<String>) -> Result<Self, ValidationError> {
        if scopes.is_empty() {
            return Err(ValidationError::EmptyScopes);
        }
        Ok(Self { scopes })
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn with(&self, other: &Self) -> Self {
        Self {
            scopes: self.scopes.union(&other.scopes).cloned().collect(),
        }
    }

    /// Returns the scopes of `self` that are not in `other`.
    ///
    /// An empty difference is reported as [`ScopeDifference::Satisfied`]
    /// instead of an empty set.
    #[must_use]
    pub fn without(&self, other: &Self) -> ScopeDifference {
        let missing: BTreeSet<String> = self.scopes.difference(&other.scopes).cloned().collect();
        Self::from_set(missing).map_or(ScopeDifference::Satisfied, ScopeDifference::Missing)
    }

    /// Returns `true` if the two sets share at least one scope.
    #[must_use]
    pub fn has_any(&self, other: &Self) -> bool {
        !self.scopes.is_disjoint(&other.scopes)
    }

    /// Returns `true` if `scope` is in the set.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Returns the number of distinct scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns an iterator over the scopes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// Returns a copy of the set with the scopes implied by write access.
    ///
    /// - `write_foo` implies `read_foo`
    /// - `unauthenticated_write_foo` implies `unauthenticated_read_foo`
    ///
    /// Granted-scope verification does not apply this expansion; callers
    /// that accept write access in place of read access opt in here.
    #[must_use]
    pub fn with_implied(&self) -> Self {
        let mut scopes = self.scopes.clone();
        scopes.extend(self.scopes.iter().filter_map(|s| implied_scope(s)));
        Self { scopes }
    }
}

fn implied_scope(scope: &str) -> Option<String> {
    scope
        .strip_prefix("unauthenticated_write_")
        .map(|rest| format!("unauthenticated_read_{rest}"))
        .or_else(|| {
            scope
                .strip_prefix("write_")
                .map(|rest| format!("read_{rest}"))
        })
}

impl FromStr for Scopes {
    type Err = ValidationError;

    /// Parses a comma-separated list, trimming whitespace and skipping empty entries.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(',').map(str::trim).filter(|scope| !scope.is_empty()))
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scope) in self.scopes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(scope)?;
        }
        Ok(())
    }
}

impl Serialize for Scopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
