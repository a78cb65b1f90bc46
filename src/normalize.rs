use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::http_client::fetch_text;
use crate::mock::generate_mock_teams;
use crate::schedule::{STATUS_SCHEDULED, STATUS_SUBMITTED, TeamRecord};
use crate::state::{DataSource, Delta};

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub teams: Vec<TeamRecord>,
    pub source: DataSource,
}

/// Fetches the scores payload and shapes it into team records. Never fails:
/// transport errors, timeouts, non-2xx responses and unparsable bodies all
/// degrade to a freshly generated mock board of `fallback_count` teams.
pub fn fetch_team_data(
    client: Option<&Client>,
    url: &str,
    fallback_count: usize,
    tx: &Sender<Delta>,
) -> FetchOutcome {
    let _ = tx.send(Delta::Log(format!("[INFO] Fetching scores from {url}")));

    let result = match client {
        Some(client) => fetch_scores(client, url),
        None => Err(anyhow::anyhow!("http client unavailable")),
    };

    match result {
        Ok(teams) => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Fetched scores for {} teams",
                teams.len()
            )));
            FetchOutcome {
                teams,
                source: DataSource::Remote,
            }
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Scores fetch error: {err:#}; using fallback data"
            )));
            FetchOutcome {
                teams: generate_mock_teams(fallback_count),
                source: DataSource::Fallback,
            }
        }
    }
}

pub fn fetch_scores(client: &Client, url: &str) -> Result<Vec<TeamRecord>> {
    let body = fetch_text(client, url).context("scores request failed")?;
    parse_scores_json(&body)
}

pub fn parse_scores_json(raw: &str) -> Result<Vec<TeamRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty scores response"));
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid scores json")?;
    if !v.is_object() {
        return Err(anyhow::anyhow!("scores json is not an object"));
    }
    Ok(normalize_scores(&v))
}

/// Maps `{ team: { roundKey: status } }` to fixed 5 + 5 schedules. Team and
/// round order follow the payload's key order. Blank team keys are skipped
/// and ids stay sequential over the teams that remain.
pub fn normalize_scores(payload: &Value) -> Vec<TeamRecord> {
    let Some(teams) = payload.as_object() else {
        return Vec::new();
    };

    teams
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .enumerate()
        .map(|(idx, (name, rounds))| {
            let id = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            let rounds = rounds.as_object();
            let round_keys: Vec<&String> = rounds.map(|r| r.keys().collect()).unwrap_or_default();
            TeamRecord::from_slots(id, name.as_str(), |slot| {
                let key = round_keys.get(slot)?;
                let value = rounds?.get(key.as_str())?;
                accepted_status(value).map(str::to_string)
            })
        })
        .collect()
}

fn accepted_status(value: &Value) -> Option<&str> {
    match value.as_str() {
        Some(s) if s == STATUS_SUBMITTED || s == STATUS_SCHEDULED => Some(s),
        _ => None,
    }
}
