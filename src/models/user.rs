use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A registered user as persisted in the user store.
///
/// The username is not part of the record; it is the key of the
/// store's username -> record map, exactly as in the JSON file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Hex-encoded SHA-256 digest of the user's password.
    /// Serialized as "password" for compatibility with existing data files.
    #[serde(rename = "password")]
    pub password_hash: String,

    /// Current session token. `None` means no active session.
    /// At most one token per user; replaced wholesale on login.
    #[serde(default)]
    pub token: Option<String>,

    /// Usernames this user follows on the leaderboard.
    #[serde(default)]
    pub friends: BTreeSet<String>,
}

impl UserRecord {
    pub fn new(password_hash: String, token: Option<String>) -> Self {
        Self {
            password_hash,
            token,
            friends: BTreeSet::new(),
        }
    }
}
