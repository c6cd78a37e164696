use biolabel_core::pagination::MAX_REVIEW_LIMIT;
use biolabel_core::review::ReviewMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Which feedback shape reviewers submit (default: classification).
    pub review_mode: ReviewMode,
    /// Upper bound on `limit` for the review queue (default: `100`).
    pub max_review_page_size: i64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REVIEW_MODE`          | `classification`           |
    /// | `MAX_REVIEW_PAGE_SIZE` | `100`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let review_mode: ReviewMode = std::env::var("REVIEW_MODE")
            .unwrap_or_else(|_| "classification".into())
            .parse()
            .unwrap_or_else(|e| panic!("REVIEW_MODE is invalid: {e}"));

        let max_review_page_size: i64 = std::env::var("MAX_REVIEW_PAGE_SIZE")
            .unwrap_or_else(|_| MAX_REVIEW_LIMIT.to_string())
            .parse()
            .expect("MAX_REVIEW_PAGE_SIZE must be a valid i64");
        assert!(
            max_review_page_size >= 1,
            "MAX_REVIEW_PAGE_SIZE must be at least 1"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            review_mode,
            max_review_page_size,
            jwt,
        }
    }
}
