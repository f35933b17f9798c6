//! Client configuration.
//!
//! The server loads it with `ClientConfig::from_env()` after calling
//! `dotenvy::dotenv()`. The browser bundle has no environment at runtime and
//! uses `ClientConfig::compiled()`, which captures the same variables at build
//! time.

use crate::core::session::DEFAULT_STORAGE_KEY;

/// Backend URL used when `API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the diary/auth backend, without trailing slash
    /// Example: https://api.example.com
    pub api_base_url: String,

    /// localStorage key holding the bearer token
    pub storage_key: String,

    /// Where the redirect OAuth flow starts. The provider comes back to
    /// `/auth-callback?token=...`. Unset hides the redirect button.
    pub google_login_url: Option<String>,

    /// OAuth client ID for the in-page Google sign-in button. Unset hides it.
    pub google_client_id: Option<String>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, storage_key: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base(api_base_url.into()),
            storage_key: storage_key.into(),
            google_login_url: None,
            google_client_id: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration baked in at compile time
    pub fn compiled() -> Self {
        Self::from_lookup(|key| {
            match key {
                "API_BASE_URL" => option_env!("API_BASE_URL"),
                "AUTH_STORAGE_KEY" => option_env!("AUTH_STORAGE_KEY"),
                "GOOGLE_LOGIN_URL" => option_env!("GOOGLE_LOGIN_URL"),
                "GOOGLE_CLIENT_ID" => option_env!("GOOGLE_CLIENT_ID"),
                _ => None,
            }
            .map(str::to_string)
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            google_login_url: var("GOOGLE_LOGIN_URL").map(|v| v.trim().to_string()),
            google_client_id: var("GOOGLE_CLIENT_ID").map(|v| v.trim().to_string()),
            ..Self::new(
                var("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                var("AUTH_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            )
        }
    }

    /// Credential login endpoint
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.api_base_url)
    }

    /// Account registration endpoint
    pub fn register_url(&self) -> String {
        format!("{}/auth/register", self.api_base_url)
    }

    /// Whether any Google sign-in entry should be offered
    pub fn google_enabled(&self) -> bool {
        self.google_login_url.is_some() || self.google_client_id.is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn normalize_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    // ========================================================================
    // Construction (no env var dependencies - thread safe)
    // ========================================================================

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.storage_key, "auth_token");
        assert_eq!(config.google_login_url, None);
        assert_eq!(config.google_client_id, None);
        assert!(!config.google_enabled());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = from_map(&[
            ("API_BASE_URL", "https://api.example.com"),
            ("AUTH_STORAGE_KEY", "diary_token"),
        ]);

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.storage_key, "diary_token");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = from_map(&[
            ("API_BASE_URL", "  "),
            ("AUTH_STORAGE_KEY", ""),
            ("GOOGLE_LOGIN_URL", " "),
            ("GOOGLE_CLIENT_ID", ""),
        ]);

        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let config = ClientConfig::new("https://api.example.com//", "k");

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.login_url(), "https://api.example.com/auth/login");
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ClientConfig::default();

        assert_eq!(config.login_url(), "http://localhost:8000/auth/login");
        assert_eq!(config.register_url(), "http://localhost:8000/auth/register");
    }

    #[test]
    fn test_google_entry_points_are_configured() {
        let config = from_map(&[
            ("GOOGLE_LOGIN_URL", " https://auth.example.com/google/start "),
            ("GOOGLE_CLIENT_ID", "1234.apps.googleusercontent.com"),
        ]);

        assert_eq!(
            config.google_login_url.as_deref(),
            Some("https://auth.example.com/google/start")
        );
        assert_eq!(
            config.google_client_id.as_deref(),
            Some("1234.apps.googleusercontent.com")
        );
        assert!(config.google_enabled());
        // The redirect entry is never derived from the API base
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_google_client_id_alone_enables_sign_in() {
        let config = from_map(&[("GOOGLE_CLIENT_ID", "abc")]);

        assert_eq!(config.google_login_url, None);
        assert!(config.google_enabled());
    }

    #[test]
    fn test_from_env_returns_config() {
        // Actual values depend on environment, so we only check invariants
        let config = ClientConfig::from_env();

        assert!(!config.api_base_url.ends_with('/'));
        assert!(!config.storage_key.is_empty());
    }

    #[test]
    fn test_compiled_returns_config() {
        let config = ClientConfig::compiled();
        assert!(!config.api_base_url.is_empty());
    }
}
