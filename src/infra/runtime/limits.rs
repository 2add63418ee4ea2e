use std::time::Duration;

use crate::infra::config::{LlmConfig, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_TIMEOUT_MS};

/// Build a reqwest client with the default provider timeouts.
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS))
        .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
        .build()
        .expect("reqwest client")
}

/// Build a reqwest client honoring the configured timeouts.
pub fn make_http_client_with(cfg: &LlmConfig) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()?;
    Ok(client)
}
