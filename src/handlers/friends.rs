use crate::core::error::FriendError;
use crate::core::state::AppState;
use crate::models::api::{FriendBody, FriendsResponse};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

/// Add a friend edge to the caller's friend set.
///
/// POST /add-friend  {"username": ...}  (Authorization: Bearer <token>)
///
/// Idempotent; the target is not validated to exist, matching the
/// fire-and-forget semantics of following an external username.
pub async fn add_friend_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<FriendBody>,
) -> Result<Response, FriendError> {
    let owner = state.sessions.authenticate(&headers)?;

    if body.username.is_empty() {
        return Err(FriendError::MissingTarget);
    }

    let friends = state.store.add_friend(&owner, &body.username)?;

    info!(owner = %owner, friend = %body.username, "Friend added");

    Ok((
        StatusCode::OK,
        Json(FriendsResponse {
            message: "Friend added".to_string(),
            friends,
        }),
    )
        .into_response())
}

/// Remove a friend edge from the caller's friend set.
///
/// POST /remove-friend  {"username": ...}  (Authorization: Bearer <token>)
///
/// Removing a non-member is a no-op that still succeeds.
pub async fn remove_friend_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<FriendBody>,
) -> Result<Response, FriendError> {
    let owner = state.sessions.authenticate(&headers)?;

    if body.username.is_empty() {
        return Err(FriendError::MissingTarget);
    }

    let friends = state.store.remove_friend(&owner, &body.username)?;

    info!(owner = %owner, friend = %body.username, "Friend removed");

    Ok((
        StatusCode::OK,
        Json(FriendsResponse {
            message: "Friend removed".to_string(),
            friends,
        }),
    )
        .into_response())
}
