// Centralized error handling for the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::api::ErrorResponse;

/// Errors from the durable user store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Session token already in use")]
    TokenCollision,

    #[error("Failed to access user store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode user store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur during signup, login, logout and any
/// token-authenticated request.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password required")]
    MissingFields,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AuthError::DuplicateUsername,
            other => AuthError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::MissingFields | AuthError::DuplicateUsername => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors that can occur while mutating a friend set.
#[derive(Error, Debug)]
pub enum FriendError {
    #[error("Username required")]
    MissingTarget,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl From<AuthError> for FriendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => FriendError::Unauthorized,
            other => FriendError::Internal(other.into()),
        }
    }
}

impl From<StoreError> for FriendError {
    fn from(err: StoreError) -> Self {
        FriendError::Internal(err.into())
    }
}

impl IntoResponse for FriendError {
    fn into_response(self) -> Response {
        let status = match &self {
            FriendError::MissingTarget => StatusCode::BAD_REQUEST,
            FriendError::Unauthorized => StatusCode::UNAUTHORIZED,
            FriendError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(
            AuthError::MissingFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DuplicateUsername.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_friend_error_statuses() {
        assert_eq!(
            FriendError::MissingTarget.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FriendError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_duplicate_username_maps_through() {
        let err: AuthError = StoreError::DuplicateUsername.into();
        assert!(matches!(err, AuthError::DuplicateUsername));
    }

    #[test]
    fn test_store_io_maps_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AuthError = StoreError::Io(io).into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
