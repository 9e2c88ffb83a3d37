pub mod auth;
pub mod fallback;
pub mod friends;
pub mod health;
pub mod leaderboard;

#[cfg(test)]
pub(crate) mod testutil;
