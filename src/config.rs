use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Unset leaves the service without a store, like a failed connection.
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    /// Number of readings returned by `GET /api/sensor`, newest first.
    pub recent_limit: i64,
    /// Abort start-up when the store cannot be reached instead of serving
    /// in degraded mode.
    pub store_required: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("PORT", "5000")
                .parse()
                .context("PORT must be a valid port number")?,
            recent_limit: parse_recent_limit(&optional("RECENT_LIMIT", "50"))
                .context("RECENT_LIMIT must be a positive integer")?,
            store_required: parse_bool(&optional("STORE_REQUIRED", "false"))
                .context("STORE_REQUIRED must be a boolean")?,
        })
    }
}

fn parse_recent_limit(raw: &str) -> Result<i64> {
    let limit: i64 = raw.trim().parse()?;
    if limit < 1 {
        bail!("recent limit must be at least 1, got {limit}");
    }
    Ok(limit)
}

/// Accepts `true/false`, `1/0` and `yes/no`, case-insensitively.
fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
