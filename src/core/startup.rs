use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::core::error::StoreError;
use crate::stores::user_store::UserStore;

/// One record of the legacy friends-only data file.
#[derive(Debug, Deserialize)]
struct LegacyFriendRecord {
    username: String,
    #[serde(default)]
    friends: Vec<String>,
}

/// One-time import of the legacy friends file into the user store.
///
/// Runs at boot. Reads the old `friends.json` (a list of
/// `{username, friends}` records), merges each record's friends into the
/// matching user record, and never writes the legacy file back. Records for
/// usernames that don't exist in the store are skipped with a warning.
/// Friend sets make the merge idempotent, so re-running on a later boot is
/// a no-op.
///
/// Returns the number of records that actually changed a user.
pub fn import_legacy_friends(store: &UserStore, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }

    let data = std::fs::read(path)
        .context(format!("Failed to read legacy friends file: {}", path.display()))?;
    let records: Vec<LegacyFriendRecord> =
        serde_json::from_slice(&data).context("Failed to parse legacy friends file")?;

    let mut merged = 0;
    for record in records {
        match store.merge_friends(&record.username, &record.friends) {
            Ok(true) => merged += 1,
            Ok(false) => {}
            Err(StoreError::UnknownUser(username)) => {
                warn!(
                    username = %username,
                    "Legacy friends record has no matching user, skipping"
                );
            }
            Err(e) => {
                return Err(e).context("Failed to merge legacy friends record");
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_legacy_file_is_noop() {
        let dir = tempdir().unwrap();
        let store = UserStore::open(dir.path().join("users.json")).unwrap();

        let merged = import_legacy_friends(&store, &dir.path().join("friends.json")).unwrap();
        assert_eq!(merged, 0);
    }

    #[test]
    fn test_import_merges_into_existing_users() {
        let dir = tempdir().unwrap();
        let store = UserStore::open(dir.path().join("users.json")).unwrap();
        store.create("alice", "digest-a", "token-a").unwrap();
        store.add_friend("alice", "bob").unwrap();

        let legacy = dir.path().join("friends.json");
        std::fs::write(
            &legacy,
            r#"[
                {"username": "alice", "friends": ["carol", "bob"]},
                {"username": "ghost", "friends": ["dave"]}
            ]"#,
        )
        .unwrap();

        let merged = import_legacy_friends(&store, &legacy).unwrap();
        assert_eq!(merged, 1);

        let friends = store.friends_of("alice").unwrap();
        assert_eq!(friends.len(), 2);
        assert!(friends.contains("bob"));
        assert!(friends.contains("carol"));

        // Legacy file is read-only for the import: untouched afterwards
        assert!(legacy.exists());

        // Re-running is a no-op thanks to set semantics
        let merged = import_legacy_friends(&store, &legacy).unwrap();
        assert_eq!(merged, 0);
    }

    #[test]
    fn test_malformed_legacy_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = UserStore::open(dir.path().join("users.json")).unwrap();

        let legacy = dir.path().join("friends.json");
        std::fs::write(&legacy, "not json").unwrap();

        assert!(import_legacy_friends(&store, &legacy).is_err());
    }
}
