use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use loanbook_core::payments::PendingBucketSource;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Where payment allocation reads the pending buckets from.
    pub pending_source: PendingBucketSource,
    pub log_format: String,
    pub page_limit_max: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("LB_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid LB_LISTEN_ADDR")?;
        let db_path = env_or("LB_DB_PATH", "./db/loanbook.db");
        let cors_allow = env_or("LB_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("LB_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let pending_source = PendingBucketSource::from_str(&env_or("LB_PENDING_SOURCE", "history"))
            .context("Invalid LB_PENDING_SOURCE")?;
        let log_format = env_or("LB_LOG_FORMAT", "text");
        let page_limit_max: i64 = env_or("LB_PAGE_LIMIT_MAX", "100")
            .parse()
            .unwrap_or(100);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            pending_source,
            log_format,
            page_limit_max: page_limit_max.max(1),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
