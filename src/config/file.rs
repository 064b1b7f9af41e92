//! File-based configuration loading
//!
//! Loads the backend route table from a JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Backend routes used by the LLM client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Plain route suggestion
    #[serde(rename = "routeSuggest", default = "default_route_suggest")]
    pub route_suggest: String,

    /// Suggestion augmented with free internet search
    #[serde(rename = "searchFree", default = "default_search_free")]
    pub search_free: String,

    /// Smart route analysis
    #[serde(rename = "smartRouteAnalysis", default = "default_smart_route_analysis")]
    pub smart_route_analysis: String,

    /// Smart chat
    #[serde(rename = "smartChat", default = "default_smart_chat")]
    pub smart_chat: String,

    /// History-bearing chat
    #[serde(default = "default_chat")]
    pub chat: String,
}

fn default_route_suggest() -> String {
    "/api/llm/route-suggest".to_string()
}

fn default_search_free() -> String {
    "/api/llm/search-free".to_string()
}

fn default_smart_route_analysis() -> String {
    "/api/enhanced-llm/smart-route-analysis".to_string()
}

fn default_smart_chat() -> String {
    "/api/enhanced-llm/smart-chat".to_string()
}

fn default_chat() -> String {
    "/api/llm/chat".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            route_suggest: default_route_suggest(),
            search_free: default_search_free(),
            smart_route_analysis: default_smart_route_analysis(),
            smart_chat: default_smart_chat(),
            chat: default_chat(),
        }
    }
}

impl RoutesConfig {
    /// Load route table from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading route table from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route file: {:?}", path))?;

        let config: RoutesConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse route JSON")?;

        config.validate()?;

        debug!("Route table loaded: {:?}", config);
        Ok(config)
    }

    /// Load route table from default locations
    /// Searches in order:
    /// 1. ~/.config/smarttravel/routes.json
    /// 2. ./smarttravel-routes.json
    ///
    /// Falls back to the built-in routes when neither exists.
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("smarttravel").join("routes.json");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        let local_path = Path::new("smarttravel-routes.json");
        if local_path.exists() {
            return Self::load(local_path);
        }

        debug!("No route file found, using built-in routes");
        Ok(Self::default())
    }

    /// Validate route table
    fn validate(&self) -> Result<()> {
        let routes = [
            ("routeSuggest", &self.route_suggest),
            ("searchFree", &self.search_free),
            ("smartRouteAnalysis", &self.smart_route_analysis),
            ("smartChat", &self.smart_chat),
            ("chat", &self.chat),
        ];

        for (name, route) in routes {
            if !route.starts_with('/') {
                anyhow::bail!("Route '{}' must start with '/': {}", name, route);
            }
        }

        Ok(())
    }
}
