//! The user behind an online-access grant.
//!
//! When an app requests online access (`grant_options[]=per-user`), the code
//! exchange response carries the user who approved the installation.

use serde::{Deserialize, Serialize};

/// A Shopify staff user associated with an online access token.
///
/// Deserializes from the `associated_user` member of the code-exchange
/// response. Name, email and locale default to empty strings and the flags to
/// `false` when Shopify omits them.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::AssociatedUser;
///
/// let user: AssociatedUser = serde_json::from_str(r#"{
///     "id": 902541635,
///     "first_name": "John",
///     "email": "john@example.com",
///     "account_owner": true
/// }"#).unwrap();
///
/// assert_eq!(user.id, 902_541_635);
/// assert!(user.account_owner);
/// assert!(!user.collaborator);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedUser {
    /// The Shopify user ID.
    pub id: u64,

    /// The user's first name.
    #[serde(default)]
    pub first_name: String,

    /// The user's last name.
    #[serde(default)]
    pub last_name: String,

    /// The user's email address.
    #[serde(default)]
    pub email: String,

    /// Whether the user's email has been verified.
    #[serde(default)]
    pub email_verified: bool,

    /// Whether the user owns the shop.
    #[serde(default)]
    pub account_owner: bool,

    /// The user's locale, e.g. `en`.
    #[serde(default)]
    pub locale: String,

    /// Whether the user is a collaborator account.
    #[serde(default)]
    pub collaborator: bool,
}

// Verify AssociatedUser is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AssociatedUser>();
};
