use serde::{Deserialize, Serialize};

/// A signed-in site member. Anonymous visitors carry a session (and
/// nonce) without a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub display_name: String,
}

/// What the client learns about its session at startup: whether a user
/// is signed in, and the anti-forgery nonce to attach to every API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    pub display_name: Option<String>,
    pub nonce: String,
}
