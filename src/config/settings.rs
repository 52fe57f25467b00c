//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_APP_BASE_URL, DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_HOURS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Base URL prepended to links in outbound email
    pub app_base_url: String,
    pub session_ttl_hours: i64,
    /// Mark the session cookie `Secure` (HTTPS-only deployments)
    pub session_cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("app_base_url", &self.app_base_url)
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let app_base_url = env::var("APP_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_APP_BASE_URL.to_string());

        // Cookies default to Secure whenever the public URL is HTTPS;
        // SESSION_COOKIE_SECURE overrides either way.
        let session_cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or_else(|_| app_base_url.starts_with("https://"));

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            app_base_url,
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            session_cookie_secure,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Session lifetime in seconds (cookie Max-Age).
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_hours * 3600
    }
}
