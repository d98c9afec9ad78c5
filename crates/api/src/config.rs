use drippress_core::nonce::DEFAULT_NONCE_LIFETIME_SECS;
use drippress_core::post_types::{parse_supported_types, DEFAULT_SUPPORTED_TYPE};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// How long background tasks get to drain after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Public base URL of the site, used for permalinks and the async endpoint.
    pub site_url: String,
    /// Base URL the front-end CSS/JS bundles are served from.
    pub assets_url: String,
    /// URL of the interaction library the front-end bundle depends on.
    pub jquery_url: String,
    /// Serve unminified, uncached assets.
    pub script_debug: bool,
    /// Post types drip gating applies to.
    pub supported_post_types: Vec<String>,
    /// HMAC secret for completion-form nonces.
    pub nonce_secret: String,
    /// Nonce lifetime in seconds (default: one day).
    pub nonce_lifetime_secs: i64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `SITE_URL`              | `http://localhost:3000`    |
    /// | `ASSETS_URL`            | `{SITE_URL}/assets`        |
    /// | `JQUERY_URL`            | `{ASSETS_URL}/js/jquery.min.js` |
    /// | `SCRIPT_DEBUG`          | `false`                    |
    /// | `DRIP_SUPPORTED_TYPES`  | `post`                     |
    /// | `NONCE_SECRET`          | **required**               |
    /// | `NONCE_LIFETIME_SECS`   | `86400`                    |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a missing/empty `NONCE_SECRET`;
    /// misconfiguration should stop the server at startup.
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let assets_url = std::env::var("ASSETS_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("{site_url}/assets"));

        let jquery_url = std::env::var("JQUERY_URL")
            .unwrap_or_else(|_| format!("{assets_url}/js/jquery.min.js"));

        let script_debug = std::env::var("SCRIPT_DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let mut supported_post_types = parse_supported_types(
            &std::env::var("DRIP_SUPPORTED_TYPES").unwrap_or_else(|_| DEFAULT_SUPPORTED_TYPE.into()),
        );
        if supported_post_types.is_empty() {
            supported_post_types.push(DEFAULT_SUPPORTED_TYPE.to_string());
        }

        let nonce_secret =
            std::env::var("NONCE_SECRET").expect("NONCE_SECRET must be set in the environment");
        assert!(!nonce_secret.is_empty(), "NONCE_SECRET must not be empty");

        let nonce_lifetime_secs: i64 = std::env::var("NONCE_LIFETIME_SECS")
            .unwrap_or_else(|_| DEFAULT_NONCE_LIFETIME_SECS.to_string())
            .parse()
            .expect("NONCE_LIFETIME_SECS must be a valid i64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            site_url,
            assets_url,
            jquery_url,
            script_debug,
            supported_post_types,
            nonce_secret,
            nonce_lifetime_secs,
            jwt,
        }
    }

    /// URL advertised to client-side code for asynchronous requests.
    pub fn ajax_url(&self) -> String {
        format!("{}/ajax", self.site_url)
    }
}

/// Interpret an environment flag (`1`, `true`, `yes`, `on`).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(v), "{v} should be truthy");
        }
        for v in ["0", "false", "", "nope"] {
            assert!(!parse_flag(v), "{v} should be falsy");
        }
    }
}
