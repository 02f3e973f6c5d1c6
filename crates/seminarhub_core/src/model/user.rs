//! Users as supplied by the external identity provider.

use serde::{Deserialize, Serialize};

/// Stable user identifier issued by the identity provider.
///
/// Treated as an opaque string; the core never parses it.
pub type UserId = String;

/// Identity of the user issuing the current request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requester {
    /// Stable identifier, used for ownership and roster checks.
    pub user_id: UserId,
    /// Display name, mirrored locally so listings can show it.
    pub user_name: String,
}

impl Requester {
    pub fn new(user_id: impl Into<UserId>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

/// Resolved user reference used in roster listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub user_id: UserId,
    pub user_name: String,
}
