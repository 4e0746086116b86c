use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("vct_analyst/", env!("CARGO_PKG_VERSION"));

/// Builds the blocking client for one run. Callers own it and pass it down.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build http client")
}
