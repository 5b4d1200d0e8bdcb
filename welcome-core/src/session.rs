use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub username: String,
}

/// Body returned by the session endpoint.
///
/// Every field defaults so that a partial body still decodes; a body without
/// `valid` is treated as an invalid session by the gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub user: SessionUser,
    #[serde(default)]
    pub token: String,
}

impl SessionInfo {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.user.username
    }
}
