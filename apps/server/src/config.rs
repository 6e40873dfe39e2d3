use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub provider_timeout: Duration,
    pub yahoo_base_url: Option<String>,
    pub coingecko_base_url: Option<String>,
    pub coingecko_api_key: Option<String>,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_millis(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("QH_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid QH_LISTEN_ADDR")?;
        let db_path = std::env::var("QH_DB_PATH").unwrap_or_else(|_| "./db/prices.db".into());
        let cors_allow = std::env::var("QH_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: env_millis("QH_REQUEST_TIMEOUT_MS", 30_000),
            provider_timeout: env_millis("QH_PROVIDER_TIMEOUT_MS", 30_000),
            yahoo_base_url: env_opt("QH_YAHOO_BASE_URL"),
            coingecko_base_url: env_opt("QH_COINGECKO_BASE_URL"),
            coingecko_api_key: env_opt("QH_COINGECKO_API_KEY"),
        })
    }
}
