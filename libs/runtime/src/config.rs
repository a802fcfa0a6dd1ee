use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credentials protecting the `/api` surface.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request timeout in seconds; 0 disables the timeout layer.
    #[serde(default)]
    pub timeout_sec: u64,
    #[serde(default)]
    pub cors_enabled: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8087,
            timeout_sec: 0,
            cors_enabled: false,
        }
    }
}

/// HTTP Basic credentials for the protected API surface.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// "trace", "debug", "info", "warn", "error" or "off".
    pub console_level: String,
    /// Rotating log file path; None logs to console only.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub file_level: String,
    /// How many rotated files to keep.
    #[serde(default)]
    pub max_backups: Option<usize>,
    /// Max size of one file in MB before rotation.
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: "info".to_string(),
            file: None,
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: Some(LoggingConfig::default()),
        }
    }
}

/// CLI arguments that override file/env configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

impl AppConfig {
    /// Layered loading: defaults → YAML file → environment variables
    /// (`TRADEBOOK_` prefix, `__` as section separator).
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let path = config_path.as_ref();
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TRADEBOOK_").split("__"));

        let config: AppConfig = figment
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        Ok(config)
    }

    /// Load from the given file, or pure defaults + env when none is given.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                use figment::{
                    providers::{Env, Serialized},
                    Figment,
                };
                let figment = Figment::from(Serialized::defaults(AppConfig::default()))
                    .merge(Env::prefixed("TRADEBOOK_").split("__"));
                figment
                    .extract()
                    .context("Failed to load default configuration")
            }
        }
    }

    /// Apply CLI overrides: explicit port wins, verbosity bumps the console
    /// log level (-v info, -vv debug, -vvv trace).
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if args.verbose > 0 {
            let level = match args.verbose {
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            self.logging
                .get_or_insert_with(LoggingConfig::default)
                .console_level = level.to_string();
        }
    }
}
