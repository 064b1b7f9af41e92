//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Chat configuration
    pub chat: ChatConfig,
    /// Wallet configuration
    pub wallet: WalletConfig,
    /// OpenRouteService configuration
    pub routing: RoutingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Smart Travel backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Number of most recent history entries sent with each chat request
    pub history_window: usize,
}

/// Wallet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// User whose wallet is shown
    pub user_id: u64,
}

/// OpenRouteService configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// API key, routing is unavailable without one
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or env-filter directives
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:8080".to_string(),
                timeout: 60,
            },
            chat: ChatConfig { history_window: 10 },
            wallet: WalletConfig { user_id: 1 },
            routing: RoutingConfig {
                api_key: None,
                base_url: "https://api.openrouteservice.org".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            api: ApiConfig {
                base_url: get_env_or_default("SMARTTRAVEL_BASE_URL", "http://127.0.0.1:8080"),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "60")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            chat: ChatConfig {
                history_window: get_env_or_default("HISTORY_WINDOW", "10")
                    .parse()
                    .context("Invalid history window")?,
            },
            wallet: WalletConfig {
                user_id: get_env_or_default("WALLET_USER_ID", "1")
                    .parse()
                    .context("Invalid wallet user id")?,
            },
            routing: RoutingConfig {
                api_key: std::env::var("ORS_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                base_url: get_env_or_default("ORS_BASE_URL", "https://api.openrouteservice.org"),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http") {
            anyhow::bail!("Invalid API base URL format, should start with 'http'");
        }

        if !self.routing.base_url.starts_with("http") {
            anyhow::bail!("Invalid routing base URL format, should start with 'http'");
        }

        if self.api.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.chat.history_window == 0 {
            anyhow::bail!("History window cannot be 0");
        }

        // accepts plain levels as well as `target=level` directives
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.level) {
            anyhow::bail!("Invalid log level: {} ({})", self.logging.level, e);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Backend base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.chat.history_window, 10);
    }

    #[test]
    fn test_api_base_trims_slash() {
        let mut settings = Settings::default();
        settings.api.base_url = "http://localhost:8080/".to_string();
        assert_eq!(settings.api_base(), "http://localhost:8080");
    }

    #[test]
    fn test_log_level_accepts_directives() {
        let mut settings = Settings::default();
        settings.logging.level = "smarttravel_client=debug,reqwest=warn".to_string();
        assert!(settings.validate().is_ok());

        settings.logging.level = "smarttravel_client=loud".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().starts_with("Invalid log level"));
    }

    #[test]
    fn test_zero_history_window_rejected() {
        let mut settings = Settings::default();
        settings.chat.history_window = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("History window"));
    }
}
