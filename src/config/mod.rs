//! Configuration management module
//!
//! Responsible for loading client configuration from environment variables and the route file.

pub mod file;
pub mod settings;

pub use file::RoutesConfig;
pub use settings::{ApiConfig, ChatConfig, LoggingConfig, RoutingConfig, Settings, WalletConfig};
