//! Process-level runtime concerns: layered configuration and logging.

pub mod config;
pub mod logging;

pub use config::{AppConfig, AuthConfig, CliArgs, LoggingConfig, ServerConfig};
