use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::{CredentialsBody, MessageResponse, SessionResponse, UserSummary};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

/// Register a new account and open its first session.
///
/// POST /signup  {"username": ..., "password": ...}
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> Result<Response, AuthError> {
    let token = state.sessions.signup(&body.username, &body.password)?;

    info!(username = %body.username, "User signed up");

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            message: "Signup successful".to_string(),
            user: UserSummary {
                username: body.username,
            },
            token,
        }),
    )
        .into_response())
}

/// Verify credentials and rotate the session token.
///
/// POST /login  {"username": ..., "password": ...}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> Result<Response, AuthError> {
    let token = state.sessions.login(&body.username, &body.password)?;

    info!(username = %body.username, "User logged in");

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            message: "Login successful".to_string(),
            user: UserSummary {
                username: body.username,
            },
            token,
        }),
    )
        .into_response())
}

/// Close the caller's session.
///
/// POST /logout  (Authorization: Bearer <token>)
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    let username = state.sessions.authenticate(&headers)?;
    state.sessions.logout(&username)?;

    info!(username = %username, "User logged out");

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
        .into_response())
}
