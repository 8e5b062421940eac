//! Client configuration
//!
//! Configuration is built once at startup (usually from the environment)
//! and handed to [`ApiClient::new`](crate::api::ApiClient::new).

use std::env;

/// Environment variable overriding the backend base URL
pub const BASE_URL_ENV: &str = "CHAT_API_BASE_URL";

/// Base URL used when no override is set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root address prefixed to every API path (no trailing slash)
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    /// Build a configuration pointing at an explicit base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.trim().trim_end_matches('/').to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_uses_override() {
        env::set_var(BASE_URL_ENV, "https://chat.example.com/api/");
        let config = Config::from_env();
        env::remove_var(BASE_URL_ENV);

        assert_eq!(config.api.base_url, "https://chat.example.com/api");
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_to_default() {
        env::remove_var(BASE_URL_ENV);
        let config = Config::from_env();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_blank_override() {
        env::set_var(BASE_URL_ENV, "   ");
        let config = Config::from_env();
        env::remove_var(BASE_URL_ENV);

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_with_base_url_trims_trailing_slashes() {
        let config = Config::with_base_url("http://127.0.0.1:9000//");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_default_matches_fallback() {
        assert_eq!(Config::default().api.base_url, DEFAULT_BASE_URL);
    }
}
