//! Application configuration from environment variables

use std::env;
use std::time::Duration;

/// Default exchange endpoint of the hosted OAuth frontend
const DEFAULT_UPSTREAM_AUTH_URL: &str =
    "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data";

/// Emails allowed in when no ALLOWED_EMAILS is configured
const DEFAULT_ALLOWED_EMAILS: &str = "vedevpered@gmail.com,vedevpered.andrey@gmail.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Allowed CORS origins, `*` for any
    pub cors_origins: Vec<String>,
    /// Emails permitted through the whitelist gate
    pub allowed_emails: Vec<String>,
    /// Identity-provider exchange endpoint
    pub upstream_auth_url: String,
    /// Budget for one identity-provider call
    pub upstream_timeout: Duration,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: 0.0.0.0:8000)
    /// - `CORS_ORIGINS`: comma-separated origins (default: *)
    /// - `ALLOWED_EMAILS`: comma-separated whitelist
    /// - `AUTH_UPSTREAM_URL`: identity-provider exchange endpoint
    /// - `AUTH_UPSTREAM_TIMEOUT_SECS`: upstream call budget (default: 10)
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let cors_origins = split_csv(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let allowed_emails = split_csv(
            &env::var("ALLOWED_EMAILS").unwrap_or_else(|_| DEFAULT_ALLOWED_EMAILS.to_string()),
        );

        let upstream_auth_url = env::var("AUTH_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_AUTH_URL.to_string());

        let upstream_timeout = env::var("AUTH_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Self {
            bind_addr,
            cors_origins,
            allowed_emails,
            upstream_auth_url,
            upstream_timeout,
        }
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BIND_ADDR",
            "CORS_ORIGINS",
            "ALLOWED_EMAILS",
            "AUTH_UPSTREAM_URL",
            "AUTH_UPSTREAM_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_cover_every_field() {
        clear_env();

        let config = AppConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.allowed_emails.len(), 2);
        assert_eq!(config.upstream_auth_url, DEFAULT_UPSTREAM_AUTH_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn reads_overrides_from_the_environment() {
        clear_env();
        std::env::set_var("BIND_ADDR", "127.0.0.1:9000");
        std::env::set_var("CORS_ORIGINS", "https://a.example, https://b.example");
        std::env::set_var("ALLOWED_EMAILS", "one@example.com");
        std::env::set_var("AUTH_UPSTREAM_TIMEOUT_SECS", "3");

        let config = AppConfig::from_env();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.allowed_emails, vec!["one@example.com"]);
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));

        clear_env();
    }
}
