use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::leaderboard::aggregator::aggregate;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

/// Rank the caller's friends by problems solved.
///
/// GET /leaderboard  (Authorization: Bearer <token>)
///
/// Provider queries for individual friends may fail; those friends come
/// back as zeroed entries with their error flag set. The endpoint itself
/// only fails on missing authentication.
pub async fn leaderboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    let username = state.sessions.authenticate(&headers)?;

    let friends = state.store.friends_of(&username).unwrap_or_default();
    let entries = aggregate(Arc::clone(&state.stats), friends).await;

    info!(
        username = %username,
        entries = entries.len(),
        failed = entries.iter().filter(|e| e.error).count(),
        "Leaderboard aggregated"
    );

    Ok((StatusCode::OK, Json(entries)).into_response())
}
