use crate::auth::password::hash_password;
use crate::auth::token::generate_token;
use crate::core::error::{AuthError, StoreError};
use crate::stores::user_store::UserStore;
use crate::utils::auth::verify_digest;
use anyhow::anyhow;
use axum::http::{header, HeaderMap};
use std::sync::Arc;

/// Collision-retry bound for token issuance. With 256-bit tokens a single
/// collision is already implausible; hitting the bound means the RNG is broken.
const TOKEN_RETRY_LIMIT: usize = 4;

/// Signup, login, logout and bearer-token authentication over the user store.
#[derive(Clone)]
pub struct Sessions {
    store: Arc<UserStore>,
}

impl Sessions {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user. The account starts with an active session, so
    /// the returned token is immediately usable.
    pub fn signup(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let digest = hash_password(password);
        for _ in 0..TOKEN_RETRY_LIMIT {
            let token = generate_token();
            match self.store.create(username, &digest, &token) {
                Ok(()) => return Ok(token),
                Err(StoreError::TokenCollision) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(AuthError::Internal(anyhow!(
            "token issuance kept colliding after {TOKEN_RETRY_LIMIT} attempts"
        )))
    }

    /// Verify credentials and rotate the session token. The previous token
    /// (if any) stops resolving the moment the new one is stored.
    ///
    /// Unknown username and wrong password are deliberately collapsed into
    /// the same `InvalidCredentials` error so callers cannot probe which
    /// usernames are registered.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let record = self
            .store
            .find_by_username(username)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_digest(&hash_password(password), &record.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        for _ in 0..TOKEN_RETRY_LIMIT {
            let token = generate_token();
            match self.store.set_token(username, Some(token.clone())) {
                Ok(()) => return Ok(token),
                Err(StoreError::TokenCollision) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(AuthError::Internal(anyhow!(
            "token issuance kept colliding after {TOKEN_RETRY_LIMIT} attempts"
        )))
    }

    /// Clear the user's session token. Callers must have authenticated
    /// first, so the username is known-good.
    pub fn logout(&self, username: &str) -> Result<(), AuthError> {
        self.store.set_token(username, None)?;
        Ok(())
    }

    /// Resolve the request's bearer token to a username.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::Unauthorized)?;
        self.store
            .find_by_token(token)
            .ok_or(AuthError::Unauthorized)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
