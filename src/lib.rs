pub mod api;
pub mod auth;
pub mod core;
pub mod handlers;
pub mod leaderboard;
pub mod models;
pub mod stores;
pub mod utils;
