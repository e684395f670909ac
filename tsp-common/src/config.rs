//! Configuration loading and sidecar endpoint resolution
//!
//! Settings are resolved once at startup in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The resolved [`ProviderConfig`] is handed to the router state; nothing
//! downstream reads the environment.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable carrying the sidecar's HTTP port
pub const SIDECAR_PORT_ENV: &str = "DAPR_HTTP_PORT";

/// Environment variable naming an explicit TOML config file
pub const CONFIG_PATH_ENV: &str = "TSP_CONFIG";

pub const DEFAULT_SIDECAR_HOST: &str = "localhost";
pub const DEFAULT_SIDECAR_PORT: u16 = 3500;
pub const DEFAULT_LISTEN_PORT: u16 = 3001;
pub const DEFAULT_STATE_STORE: &str = "tweet-store";
pub const DEFAULT_PUBSUB_NAME: &str = "processed";
pub const DEFAULT_TOPIC: &str = "processed";
pub const DEFAULT_SCORING_APP_ID: &str = "processor";
pub const DEFAULT_SCORING_METHOD: &str = "sentiment-score";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Sidecar API version path segment
const SIDECAR_API_VERSION: &str = "v1.0";

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Inbound HTTP listen port
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub sidecar: SidecarToml,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[sidecar]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarToml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub state_store: Option<String>,
    pub pubsub_name: Option<String>,
    pub topic: Option<String>,
    pub scoring_app_id: Option<String>,
    pub scoring_method: Option<String>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML {} failed: {}", path.display(), e)))?;
        Self::parse(&content)
    }
}

/// Resolved sidecar location and component names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarConfig {
    pub host: String,
    pub port: u16,
    /// State store component receiving post writes
    pub state_store: String,
    /// Pub/sub component the processed topic lives on
    pub pubsub_name: String,
    pub topic: String,
    /// App id of the scoring service, reached via service invocation
    pub scoring_app_id: String,
    pub scoring_method: String,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SIDECAR_HOST.to_string(),
            port: DEFAULT_SIDECAR_PORT,
            state_store: DEFAULT_STATE_STORE.to_string(),
            pubsub_name: DEFAULT_PUBSUB_NAME.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            scoring_app_id: DEFAULT_SCORING_APP_ID.to_string(),
            scoring_method: DEFAULT_SCORING_METHOD.to_string(),
        }
    }
}

impl SidecarConfig {
    /// Default component names against a sidecar at `host:port`
    pub fn at(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// `http://{host}:{port}/v1.0`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/{}", self.host, self.port, SIDECAR_API_VERSION)
    }

    /// Key/value write endpoint
    pub fn state_url(&self) -> String {
        format!("{}/state/{}", self.base_url(), self.state_store)
    }

    /// Topic publish endpoint
    pub fn publish_url(&self) -> String {
        format!("{}/publish/{}/{}", self.base_url(), self.pubsub_name, self.topic)
    }

    /// Sentiment scoring service invocation endpoint
    pub fn scoring_url(&self) -> String {
        format!(
            "{}/invoke/{}/method/{}",
            self.base_url(),
            self.scoring_app_id,
            self.scoring_method
        )
    }
}

/// Fully resolved provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub listen_port: u16,
    pub sidecar: SidecarConfig,
    pub log_level: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            sidecar: SidecarConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub listen_port: Option<u16>,
    pub sidecar_port: Option<u16>,
}

/// Resolves [`ProviderConfig`] from CLI overrides, environment, TOML and defaults
pub struct ConfigResolver {
    overrides: ConfigOverrides,
}

impl ConfigResolver {
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self { overrides }
    }

    /// Resolve the provider configuration
    ///
    /// Errors on a malformed TOML file or an unparseable `DAPR_HTTP_PORT`.
    pub fn resolve(&self) -> Result<ProviderConfig> {
        let toml = self.load_toml()?;
        let defaults = SidecarConfig::default();

        let sidecar = SidecarConfig {
            host: toml.sidecar.host.unwrap_or(defaults.host),
            port: self.resolve_sidecar_port(toml.sidecar.port)?,
            state_store: toml.sidecar.state_store.unwrap_or(defaults.state_store),
            pubsub_name: toml.sidecar.pubsub_name.unwrap_or(defaults.pubsub_name),
            topic: toml.sidecar.topic.unwrap_or(defaults.topic),
            scoring_app_id: toml.sidecar.scoring_app_id.unwrap_or(defaults.scoring_app_id),
            scoring_method: toml.sidecar.scoring_method.unwrap_or(defaults.scoring_method),
        };

        Ok(ProviderConfig {
            listen_port: self
                .overrides
                .listen_port
                .or(toml.port)
                .unwrap_or(DEFAULT_LISTEN_PORT),
            sidecar,
            log_level: toml
                .logging
                .level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    fn resolve_sidecar_port(&self, toml_port: Option<u16>) -> Result<u16> {
        // Priority 1: Command-line argument
        if let Some(port) = self.overrides.sidecar_port {
            return Ok(port);
        }

        // Priority 2: Environment variable
        if let Ok(value) = std::env::var(SIDECAR_PORT_ENV) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.parse::<u16>().map_err(|e| {
                    Error::Config(format!("Invalid {} '{}': {}", SIDECAR_PORT_ENV, value, e))
                });
            }
        }

        // Priority 3/4: TOML, then compiled default
        Ok(toml_port.unwrap_or(DEFAULT_SIDECAR_PORT))
    }

    /// Load the TOML config, or defaults when none is present
    ///
    /// An explicitly named file that does not exist only warns; the
    /// per-user default location is silently skipped when absent.
    fn load_toml(&self) -> Result<TomlConfig> {
        let explicit = self
            .overrides
            .config_path
            .clone()
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                warn!("Config file {} not found, using defaults", path.display());
                return Ok(TomlConfig::default());
            }
            info!("Loading config from {}", path.display());
            return TomlConfig::from_file(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                TomlConfig::from_file(&path)
            }
            _ => Ok(TomlConfig::default()),
        }
    }
}

/// `~/.config/tsp/provider.toml` (platform equivalent elsewhere)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tsp").join("provider.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sidecar_urls() {
        let sidecar = SidecarConfig::default();

        assert_eq!(sidecar.base_url(), "http://localhost:3500/v1.0");
        assert_eq!(sidecar.state_url(), "http://localhost:3500/v1.0/state/tweet-store");
        assert_eq!(
            sidecar.publish_url(),
            "http://localhost:3500/v1.0/publish/processed/processed"
        );
        assert_eq!(
            sidecar.scoring_url(),
            "http://localhost:3500/v1.0/invoke/processor/method/sentiment-score"
        );
    }

    #[test]
    fn test_sidecar_at_keeps_default_components() {
        let sidecar = SidecarConfig::at("127.0.0.1", 41000);
        assert_eq!(sidecar.state_url(), "http://127.0.0.1:41000/v1.0/state/tweet-store");
    }

    #[test]
    fn test_toml_parse_partial() {
        let config = TomlConfig::parse(
            r#"
            port = 4001

            [sidecar]
            topic = "scored"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, Some(4001));
        assert_eq!(config.sidecar.topic.as_deref(), Some("scored"));
        assert!(config.sidecar.port.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_toml_parse_invalid() {
        let err = TomlConfig::parse("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
