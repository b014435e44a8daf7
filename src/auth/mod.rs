//! Authentication types for Shopify apps.
//!
//! - [`Scopes`]: a non-empty set of OAuth scopes
//! - [`ScopeDifference`]: the result of subtracting one scope set from another
//! - [`AssociatedUser`]: the staff member behind an online access token
//! - [`oauth`]: the authorization code grant
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{ScopeDifference, Scopes};
//!
//! let required: Scopes = "read_products,read_orders".parse().unwrap();
//! let granted: Scopes = "read_products,write_products".parse().unwrap();
//!
//! match required.without(&granted) {
//!     ScopeDifference::Satisfied => unreachable!(),
//!     ScopeDifference::Missing(missing) => assert_eq!(missing.to_string(), "read_orders"),
//! }
//! ```

mod associated_user;
pub mod oauth;
mod scopes;

pub use associated_user::AssociatedUser;
pub use scopes::{ScopeDifference, Scopes};
