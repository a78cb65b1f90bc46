use std::env;
use std::time::Duration;

use crate::mock::DEFAULT_MOCK_TEAMS;

pub const DEFAULT_SCORES_URL: &str = "http://127.0.0.1:8765/scores_submitted";
pub const DEFAULT_LOAD_URL: &str = "http://127.0.0.1:8765/load";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scores_url: String,
    pub load_url: String,
    pub fetch_timeout: Duration,
    pub mock_team_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scores_url: DEFAULT_SCORES_URL.to_string(),
            load_url: DEFAULT_LOAD_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            mock_team_count: DEFAULT_MOCK_TEAMS,
        }
    }
}

impl Settings {
    /// Reads SCORES_URL, LOAD_URL, FETCH_TIMEOUT_SECS and MOCK_TEAM_COUNT.
    /// `.env` files are loaded by the binary before this runs.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt = |key: &str| {
            lookup(key).and_then(|val| {
                let trimmed = val.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let timeout_secs = opt("FETCH_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
            .clamp(1, 60);
        let mock_team_count = opt("MOCK_TEAM_COUNT")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MOCK_TEAMS)
            .clamp(1, 500);

        Self {
            scores_url: opt("SCORES_URL").unwrap_or_else(|| DEFAULT_SCORES_URL.to_string()),
            load_url: opt("LOAD_URL").unwrap_or_else(|| DEFAULT_LOAD_URL.to_string()),
            fetch_timeout: Duration::from_secs(timeout_secs),
            mock_team_count,
        }
    }
}
