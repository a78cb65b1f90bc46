use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};

use round_board::config::Settings;
use round_board::http_client::build_http_client;
use round_board::normalize::{fetch_team_data, parse_scores_json};
use round_board::state::{Delta, source_label};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let teams = if let Some(path) = parse_file_arg() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        parse_scores_json(&raw)?
    } else {
        let settings = Settings::from_env();
        let client = build_http_client(settings.fetch_timeout)?;
        let (tx, rx) = mpsc::channel();
        let outcome = fetch_team_data(
            Some(&client),
            &settings.scores_url,
            settings.mock_team_count,
            &tx,
        );
        drop(tx);
        for delta in rx {
            if let Delta::Log(line) = delta {
                eprintln!("{line}");
            }
        }
        eprintln!("Source: {}", source_label(outcome.source));
        outcome.teams
    };

    let json = serde_json::to_string_pretty(&teams).context("serialize teams")?;
    println!("{json}");
    Ok(())
}

fn parse_file_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--file=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--file" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
