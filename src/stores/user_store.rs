use crate::core::error::StoreError;
use crate::models::user::UserRecord;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Durable store of user records, keyed by username.
///
/// The whole map lives in memory behind a single `RwLock` and is written
/// back to a JSON file as one document. Every mutation holds the write
/// lock across mutate-and-persist, so two overlapping mutations can never
/// lose each other's update. Reads take the read lock and return cloned
/// snapshots.
///
/// A secondary token -> username index backs `find_by_token`; it is updated
/// under the same write lock as the primary map so the two can never be
/// observed out of sync.
pub struct UserStore {
    inner: RwLock<Inner>,
    path: PathBuf,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    token_index: HashMap<String, String>,
}

impl UserStore {
    /// Open the store at `path`, loading existing records if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let users: HashMap<String, UserRecord> = if path.exists() {
            let data = fs::read(&path)?;
            serde_json::from_slice(&data)?
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            HashMap::new()
        };

        let mut token_index = HashMap::new();
        for (username, record) in &users {
            if let Some(token) = &record.token {
                token_index.insert(token.clone(), username.clone());
            }
        }

        Ok(Self {
            inner: RwLock::new(Inner { users, token_index }),
            path,
        })
    }

    /// Acquire the read lock. A caller that panicked while holding the lock
    /// poisons it; the data is still consistent (mutations roll back before
    /// unwinding reaches the caller), so recover the guard rather than let
    /// one dead request wedge every later store call.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Panic while holding the write lock, poisoning it.
    /// Test hook for the recovery path in `read`/`write`.
    #[cfg(test)]
    fn panic_while_locked(&self) {
        let _guard = self.write();
        panic!("simulated panic while holding the store lock");
    }

    /// Create a new user with an already-hashed credential and an initial
    /// session token (signup implies an active session).
    pub fn create(&self, username: &str, digest: &str, token: &str) -> Result<(), StoreError> {
        let mut inner = self.write();

        if inner.users.contains_key(username) {
            return Err(StoreError::DuplicateUsername);
        }
        if inner.token_index.contains_key(token) {
            return Err(StoreError::TokenCollision);
        }

        inner.users.insert(
            username.to_string(),
            UserRecord::new(digest.to_string(), Some(token.to_string())),
        );

        if let Err(e) = self.persist(&inner.users) {
            inner.users.remove(username);
            return Err(e);
        }

        inner
            .token_index
            .insert(token.to_string(), username.to_string());
        Ok(())
    }

    /// Look up a user record by username. Returns a snapshot.
    pub fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.read().users.get(username).cloned()
    }

    /// Resolve a session token to its owning username.
    pub fn find_by_token(&self, token: &str) -> Option<String> {
        self.read().token_index.get(token).cloned()
    }

    /// Replace the user's session token: `Some` on login, `None` on logout.
    ///
    /// Rejects a token already bound to a different user so the
    /// token index never becomes ambiguous.
    pub fn set_token(&self, username: &str, token: Option<String>) -> Result<(), StoreError> {
        let mut inner = self.write();

        if let Some(t) = &token {
            if inner.token_index.get(t).is_some_and(|owner| owner != username) {
                return Err(StoreError::TokenCollision);
            }
        }

        let previous = {
            let record = inner
                .users
                .get_mut(username)
                .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
            std::mem::replace(&mut record.token, token.clone())
        };

        if let Err(e) = self.persist(&inner.users) {
            if let Some(record) = inner.users.get_mut(username) {
                record.token = previous;
            }
            return Err(e);
        }

        if let Some(old) = previous {
            inner.token_index.remove(&old);
        }
        if let Some(t) = token {
            inner.token_index.insert(t, username.to_string());
        }
        Ok(())
    }

    /// Add a friend edge. Idempotent: re-adding an existing friend succeeds
    /// without touching the disk. Returns the updated friend set.
    pub fn add_friend(
        &self,
        username: &str,
        friend: &str,
    ) -> Result<BTreeSet<String>, StoreError> {
        self.update_friends(username, |friends| {
            friends.insert(friend.to_string());
        })
    }

    /// Remove a friend edge. Removing a non-member is a no-op, not an error.
    /// Returns the updated friend set.
    pub fn remove_friend(
        &self,
        username: &str,
        friend: &str,
    ) -> Result<BTreeSet<String>, StoreError> {
        self.update_friends(username, |friends| {
            friends.remove(friend);
        })
    }

    /// The user's current friend set, or `None` for an unknown user.
    pub fn friends_of(&self, username: &str) -> Option<BTreeSet<String>> {
        self.read()
            .users
            .get(username)
            .map(|record| record.friends.clone())
    }

    /// Merge a batch of friends into a user's friend set in one write.
    /// Returns whether anything changed. Used by the legacy import.
    pub fn merge_friends(&self, username: &str, friends: &[String]) -> Result<bool, StoreError> {
        let mut inner = self.write();

        let previous = {
            let record = inner
                .users
                .get_mut(username)
                .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
            let previous = record.friends.clone();
            record.friends.extend(friends.iter().cloned());
            if record.friends == previous {
                return Ok(false);
            }
            previous
        };

        if let Err(e) = self.persist(&inner.users) {
            if let Some(record) = inner.users.get_mut(username) {
                record.friends = previous;
            }
            return Err(e);
        }
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().users.is_empty()
    }

    fn update_friends(
        &self,
        username: &str,
        mutate: impl FnOnce(&mut BTreeSet<String>),
    ) -> Result<BTreeSet<String>, StoreError> {
        let mut inner = self.write();

        let previous = {
            let record = inner
                .users
                .get_mut(username)
                .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
            let previous = record.friends.clone();
            mutate(&mut record.friends);
            if record.friends == previous {
                return Ok(previous);
            }
            previous
        };

        if let Err(e) = self.persist(&inner.users) {
            if let Some(record) = inner.users.get_mut(username) {
                record.friends = previous;
            }
            return Err(e);
        }

        Ok(inner
            .users
            .get(username)
            .map(|record| record.friends.clone())
            .unwrap_or_default())
    }

    /// Write the full map to a temp file, then rename into place.
    /// A crash mid-write leaves the previous file intact, never a
    /// half-written one.
    fn persist(&self, users: &HashMap<String, UserRecord>) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(users)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
