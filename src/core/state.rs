// Application state (AppState)

use crate::api::client::StatsClient;
use crate::auth::sessions::Sessions;
use crate::core::config::Config;
use crate::stores::user_store::UserStore;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Durable user store (identity, sessions, friend sets)
    pub store: Arc<UserStore>,

    /// Signup/login/logout and bearer-token authentication
    pub sessions: Sessions,

    /// Client for the external problem-solving stats provider
    pub stats: Arc<StatsClient>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: UserStore) -> Result<Self> {
        let config = Arc::new(config);
        let store = Arc::new(store);

        let stats = Arc::new(StatsClient::new(
            config.provider.endpoint.clone(),
            Duration::from_secs(config.provider.timeout_secs),
        )?);

        Ok(Self {
            sessions: Sessions::new(Arc::clone(&store)),
            store,
            stats,
            config,
        })
    }
}
