//! Smart Travel client library
//!
//! Single-flight LLM chat, structured JSON extraction from model output, and
//! thin clients for the wallet and routing APIs

pub mod config;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

// Re-export common types
pub use config::{RoutesConfig, Settings};
pub use models::{ChatTurn, Role, RouteRecommendation, SmartChatReply};
pub use services::{
    extract_structured, extract_structured_json, LlmClient, RouteServiceClient, WalletClient,
};
pub use utils::error::{ClientError, ClientResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
