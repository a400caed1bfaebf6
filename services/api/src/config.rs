use reppay_core::tracing::LogFormat;

/// API service configuration loaded from environment variables.
///
/// Every setting has a default so `cargo run` works against a local SQLite
/// file with the in-process mailer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// SQLite connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Pool size (default 1). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub database_max_connections: u32,
    /// Drop and recreate every table at startup (default false, development only).
    /// Env var: `DATABASE_RESET`.
    pub database_reset: bool,
    /// TCP port to listen on (default 3001). Env var: `PORT`.
    pub port: u16,
    /// HTTP mail relay endpoint. Unset selects the in-process mailer. Env var: `MAIL_API_URL`.
    pub mail_api_url: Option<String>,
    /// Bearer token for the mail relay. Env var: `MAIL_API_KEY`.
    pub mail_api_key: Option<String>,
    /// Sender address for outgoing mail. Env var: `MAIL_FROM`.
    pub mail_from: String,
    /// `json` (default) or `pretty`. Env var: `LOG_FORMAT`.
    pub log_format: LogFormat,
}

const DEFAULT_DATABASE_URL: &str = "sqlite://reppay.sqlite?mode=rwc";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAIL_FROM: &str = "no-reply@reppay.app";

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            database_max_connections: non_empty("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1),
            database_reset: non_empty("DATABASE_RESET")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            port: non_empty("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            mail_api_url: non_empty("MAIL_API_URL"),
            mail_api_key: non_empty("MAIL_API_KEY"),
            mail_from: non_empty("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_owned()),
            log_format: non_empty("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}
