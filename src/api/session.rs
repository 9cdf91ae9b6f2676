use serde::{Deserialize, Serialize};

/// Bearer credentials for one signed-in user.
///
/// Passed explicitly into [`crate::api::ApiClient::new`] rather than held in
/// module-level state, so two clients can serve two sessions side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: i64,
}

impl AuthSession {
    pub fn new(access_token: impl Into<String>, user_id: i64) -> Self {
        AuthSession {
            access_token: access_token.into(),
            user_id,
        }
    }
}
