use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Per-difficulty solved counts for one provider user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolvedCounts {
    pub total: u32,
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

/// One row of the leaderboard. `error` marks an entry whose provider query
/// failed and whose counts were therefore zeroed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(rename = "totalSolved")]
    pub total_solved: u32,
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    #[serde(default)]
    pub error: bool,
}

impl LeaderboardEntry {
    fn solved(username: String, counts: SolvedCounts) -> Self {
        Self {
            username,
            total_solved: counts.total,
            easy: counts.easy,
            medium: counts.medium,
            hard: counts.hard,
            error: false,
        }
    }

    fn failed(username: String) -> Self {
        Self {
            username,
            total_solved: 0,
            easy: 0,
            medium: 0,
            hard: 0,
            error: true,
        }
    }
}

/// Source of per-user solved counts. The production implementation is the
/// HTTP stats client; tests substitute an in-memory fake.
pub trait StatsProvider: Send + Sync + 'static {
    fn fetch_stats(
        &self,
        username: &str,
    ) -> impl Future<Output = anyhow::Result<SolvedCounts>> + Send;
}

/// Query the provider once per friend, all in parallel, and rank the results.
///
/// Fan-out/fan-in: every query runs as its own task and the function only
/// returns once all of them have settled, so a slow or failing query never
/// blocks or drops the others' results. Every friend comes back as exactly
/// one entry: a failed query degrades to a zero-valued entry with its error
/// flag set, and so does a query task that dies outright, since each handle
/// stays paired with its username. Per-friend failures are never surfaced to
/// the caller. The final list is sorted by total solved, descending, with no
/// guaranteed order among ties.
pub async fn aggregate<P: StatsProvider>(
    provider: Arc<P>,
    friends: BTreeSet<String>,
) -> Vec<LeaderboardEntry> {
    let tasks: Vec<(String, JoinHandle<LeaderboardEntry>)> = friends
        .into_iter()
        .map(|username| {
            let provider = Arc::clone(&provider);
            let task_username = username.clone();
            let handle = tokio::spawn(async move {
                match provider.fetch_stats(&task_username).await {
                    Ok(counts) => LeaderboardEntry::solved(task_username, counts),
                    Err(e) => {
                        warn!(
                            username = %task_username,
                            error = %e,
                            "Stats query failed, recording zeroed entry"
                        );
                        LeaderboardEntry::failed(task_username)
                    }
                }
            });
            (username, handle)
        })
        .collect();

    let mut entries = Vec::with_capacity(tasks.len());
    for (username, handle) in tasks {
        match handle.await {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(
                    username = %username,
                    error = %e,
                    "Stats query task died, recording zeroed entry"
                );
                entries.push(LeaderboardEntry::failed(username));
            }
        }
    }

    entries.sort_by(|a, b| b.total_solved.cmp(&a.total_solved));
    entries
}
