use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    /// Chat is disabled when unset.
    pub anthropic_api_key: Option<String>,
    /// Backlog limit of the notification fan-out queue.
    pub notify_queue_capacity: usize,
    pub notify_workers: usize,
    /// Per-seeker delivery limit; a stalled transport counts as a failed delivery.
    pub notify_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            access_token_expire_minutes: parse_env("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            notify_queue_capacity: parse_env("NOTIFY_QUEUE_CAPACITY", 1024)?,
            notify_workers: parse_env("NOTIFY_WORKERS", 4)?,
            notify_timeout_secs: parse_env("NOTIFY_TIMEOUT_SECS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
