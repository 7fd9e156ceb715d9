//! Session snapshot type.

use serde::{Deserialize, Serialize};

/// Snapshot of the externally-issued authentication session.
///
/// Issuance, refresh, and destruction belong to the auth provider; this
/// crate only carries the snapshot so the fetch client can attach the
/// credential header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The authenticated actor's user ID.
    pub user_id: String,
    /// Bearer token attached to authenticated requests.
    pub access_token: String,
    /// Actor email, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// Creates a session snapshot.
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
            email: None,
        }
    }
}
