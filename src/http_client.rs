use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

const CLIENT_USER_AGENT: &str = "round_board/0.1";
const ERROR_BODY_MAX_CHARS: usize = 200;

/// `timeout` bounds the whole request; reqwest aborts it once elapsed.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    // The scores backend sits on the local network; never route it through a proxy.
    Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}

pub fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, error_snippet(&body)));
    }
    Ok(body)
}

/// Asks the backend to reload its scores. Only the status matters.
pub fn trigger_load(client: &Client, url: &str) -> Result<()> {
    fetch_text(client, url).context("load request failed")?;
    Ok(())
}

/// Error body collapsed onto one line and capped for the console.
fn error_snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= ERROR_BODY_MAX_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(ERROR_BODY_MAX_CHARS).collect();
    out.push('…');
    out
}
