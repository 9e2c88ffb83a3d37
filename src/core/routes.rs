// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Account endpoints
        .route("/signup", post(crate::handlers::auth::signup_handler))
        .route("/login", post(crate::handlers::auth::login_handler))
        .route("/logout", post(crate::handlers::auth::logout_handler))

        // Friend endpoints (require bearer token)
        .route("/add-friend", post(crate::handlers::friends::add_friend_handler))
        .route("/remove-friend", post(crate::handlers::friends::remove_friend_handler))

        // Leaderboard (requires bearer token)
        .route("/leaderboard", get(crate::handlers::leaderboard::leaderboard_handler))

        .route("/health", get(crate::handlers::health::health_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
