use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use chrono::Local;
use reqwest::blocking::Client;

use crate::config::Settings;
use crate::http_client::{build_http_client, trigger_load};
use crate::normalize::fetch_team_data;
use crate::state::{Delta, ProviderCommand};

pub fn spawn_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    settings: Settings,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_provider(&tx, &cmd_rx, &settings))
}

/// Blocks on commands until the sender side hangs up.
pub fn run_provider(tx: &Sender<Delta>, cmd_rx: &Receiver<ProviderCommand>, settings: &Settings) {
    let client = match build_http_client(settings.fetch_timeout) {
        Ok(client) => Some(client),
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] {err:#}; fetches will use fallback data")));
            None
        }
    };

    while let Ok(cmd) = cmd_rx.recv() {
        match collapse_pending(cmd, cmd_rx) {
            ProviderCommand::FetchTeams => fetch_and_send(client.as_ref(), settings, tx),
            ProviderCommand::Refresh => refresh(client.as_ref(), settings, tx),
        }
    }
}

/// Folds every command already queued behind `first` into one. Refresh wins
/// over a plain fetch since it fetches too.
pub fn collapse_pending(
    first: ProviderCommand,
    cmd_rx: &Receiver<ProviderCommand>,
) -> ProviderCommand {
    let mut cmd = first;
    while let Ok(next) = cmd_rx.try_recv() {
        if next == ProviderCommand::Refresh {
            cmd = ProviderCommand::Refresh;
        }
    }
    cmd
}

fn refresh(client: Option<&Client>, settings: &Settings, tx: &Sender<Delta>) {
    let load = match client {
        Some(client) => trigger_load(client, &settings.load_url),
        None => Err(anyhow::anyhow!("http client unavailable")),
    };
    match load {
        Ok(()) => {
            let at = Local::now().format("%H:%M:%S").to_string();
            let _ = tx.send(Delta::Refreshed { at });
            fetch_and_send(client, settings, tx);
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Refresh failed: {err:#}")));
            let _ = tx.send(Delta::RefreshFailed);
        }
    }
}

fn fetch_and_send(client: Option<&Client>, settings: &Settings, tx: &Sender<Delta>) {
    let outcome = fetch_team_data(
        client,
        &settings.scores_url,
        settings.mock_team_count,
        tx,
    );
    let _ = tx.send(Delta::SetTeams {
        teams: outcome.teams,
        source: outcome.source,
    });
}
