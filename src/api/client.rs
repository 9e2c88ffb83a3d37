use crate::leaderboard::aggregator::{SolvedCounts, StatsProvider};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;

/// GraphQL query for a user's accepted-submission counts per difficulty.
const SUBMIT_STATS_QUERY: &str = "\
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
  }
}";

/// HTTP client for the external problem-solving stats provider.
///
/// Every request carries the client-level timeout, so one unresponsive
/// upstream call cannot stall a leaderboard aggregation indefinitely.
pub struct StatsClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
struct MatchedUser {
    #[serde(rename = "submitStats")]
    submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
struct DifficultyCount {
    difficulty: String,
    count: u32,
}

impl StatsClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    async fn query_stats(&self, username: &str) -> Result<SolvedCounts> {
        let body = json!({
            "query": SUBMIT_STATS_QUERY,
            "variables": { "username": username },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to stats provider")?;

        if !response.status().is_success() {
            bail!("Stats provider returned error status: {}", response.status());
        }

        let payload = response
            .json::<GraphqlResponse>()
            .await
            .context("Failed to parse JSON response from stats provider")?;

        let matched = payload
            .data
            .and_then(|data| data.matched_user)
            .with_context(|| format!("Stats provider has no user named '{}'", username))?;

        Ok(counts_from(&matched.submit_stats.ac_submission_num))
    }
}

/// Pick the four difficulty buckets out of the provider's list.
/// Missing buckets default to 0.
fn counts_from(stats: &[DifficultyCount]) -> SolvedCounts {
    let count_for = |difficulty: &str| {
        stats
            .iter()
            .find(|entry| entry.difficulty == difficulty)
            .map(|entry| entry.count)
            .unwrap_or(0)
    };

    SolvedCounts {
        total: count_for("All"),
        easy: count_for("Easy"),
        medium: count_for("Medium"),
        hard: count_for("Hard"),
    }
}

impl StatsProvider for StatsClient {
    fn fetch_stats(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<SolvedCounts>> + Send {
        self.query_stats(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_client_creation() {
        let client = StatsClient::new(
            "https://leetcode.com/graphql".to_string(),
            Duration::from_secs(10),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_full_response() {
        let raw = r#"{
            "data": {
                "matchedUser": {
                    "submitStats": {
                        "acSubmissionNum": [
                            {"difficulty": "All", "count": 120, "submissions": 300},
                            {"difficulty": "Easy", "count": 60, "submissions": 90},
                            {"difficulty": "Medium", "count": 50, "submissions": 150},
                            {"difficulty": "Hard", "count": 10, "submissions": 60}
                        ]
                    }
                }
            }
        }"#;

        let payload: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let matched = payload.data.unwrap().matched_user.unwrap();
        let counts = counts_from(&matched.submit_stats.ac_submission_num);

        assert_eq!(
            counts,
            SolvedCounts {
                total: 120,
                easy: 60,
                medium: 50,
                hard: 10
            }
        );
    }

    #[test]
    fn test_missing_buckets_default_to_zero() {
        let raw = r#"{
            "data": {
                "matchedUser": {
                    "submitStats": {
                        "acSubmissionNum": [
                            {"difficulty": "All", "count": 7},
                            {"difficulty": "Easy", "count": 7}
                        ]
                    }
                }
            }
        }"#;

        let payload: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let matched = payload.data.unwrap().matched_user.unwrap();
        let counts = counts_from(&matched.submit_stats.ac_submission_num);

        assert_eq!(counts.total, 7);
        assert_eq!(counts.easy, 7);
        assert_eq!(counts.medium, 0);
        assert_eq!(counts.hard, 0);
    }

    #[test]
    fn test_unknown_user_parses_to_none() {
        // The provider answers unknown usernames with a null matchedUser
        let raw = r#"{"data": {"matchedUser": null}}"#;
        let payload: GraphqlResponse = serde_json::from_str(raw).unwrap();
        assert!(payload.data.unwrap().matched_user.is_none());
    }

    #[test]
    fn test_empty_stats_list() {
        let counts = counts_from(&[]);
        assert_eq!(counts, SolvedCounts::default());
    }
}
