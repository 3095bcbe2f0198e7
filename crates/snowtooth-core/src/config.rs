//! Configuration loading and typed config structures.
//!
//! Configuration lives in an optional `snowtooth.yaml`. Every field has a
//! default, so a missing file or a partial file is fine. Environment
//! variables are applied on top of the parsed file so deployments can
//! override the listen address, data directory, and provider credentials
//! without editing YAML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "snowtooth.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override had an unusable value.
    #[error("invalid value for {name} `{value}`: {reason}")]
    Env {
        /// The variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnowtoothConfig {
    /// HTTP listen address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the seed collections come from.
    #[serde(default)]
    pub data: DataConfig,

    /// External activity provider settings.
    #[serde(default)]
    pub activities: ActivityConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SnowtoothConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if it is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults. Environment
    /// overrides are applied in both cases.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override settings from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override settings from `lookup`, keyed by environment variable name.
    ///
    /// Recognised names: `SNOWTOOTH_HOST`, `SNOWTOOTH_PORT`,
    /// `SNOWTOOTH_DATA_DIR`, `SNOWTOOTH_LOG`, `STRAVA_ACCESS_TOKEN`,
    /// `STRAVA_API_URL`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("SNOWTOOTH_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("SNOWTOOTH_PORT") {
            self.server.port = val.parse().map_err(|e: std::num::ParseIntError| ConfigError::Env {
                name: "SNOWTOOTH_PORT",
                value: val.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(val) = lookup("SNOWTOOTH_DATA_DIR") {
            self.data.dir = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("SNOWTOOTH_LOG") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("STRAVA_ACCESS_TOKEN") {
            self.activities.access_token = Some(val);
        }
        if let Some(val) = lookup("STRAVA_API_URL") {
            self.activities.api_url = val;
        }
        Ok(())
    }
}

/// HTTP listen address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Seed data location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Directory holding `lifts.json` and `trails.json`. When unset the
    /// bundled Snowtooth Mountain data is used.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Activity provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivityConfig {
    /// Base URL of the Strava v3 API.
    #[serde(default = "default_activity_api_url")]
    pub api_url: String,

    /// OAuth bearer token. Without one the provider is disabled.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Page size requested from the provider.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Request timeout in milliseconds.
    #[serde(default = "default_activity_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            api_url: default_activity_api_url(),
            access_token: None,
            per_page: default_per_page(),
            timeout_ms: default_activity_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    4000
}

fn default_activity_api_url() -> String {
    "https://www.strava.com/api/v3".to_owned()
}

const fn default_per_page() -> u32 {
    100
}

const fn default_activity_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SnowtoothConfig::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.activities.per_page, 100);
        assert!(config.activities.access_token.is_none());
        assert!(config.data.dir.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r#"
server:
  port: 8080
data:
  dir: "/srv/snowtooth"
activities:
  per_page: 30
"#;
        let config = SnowtoothConfig::parse(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/snowtooth")));
        assert_eq!(config.activities.per_page, 30);
        assert_eq!(config.activities.api_url, "https://www.strava.com/api/v3");
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = SnowtoothConfig::parse("{}").unwrap();
        assert_eq!(config, SnowtoothConfig::default());
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SNOWTOOTH_PORT", "9090"),
            ("STRAVA_ACCESS_TOKEN", "secret"),
            ("SNOWTOOTH_DATA_DIR", "/data"),
        ]);
        let mut config = SnowtoothConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| (*v).to_owned()))
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.activities.access_token.as_deref(), Some("secret"));
        assert_eq!(config.data.dir, Some(PathBuf::from("/data")));
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = SnowtoothConfig::default();
        let err = config
            .apply_overrides(|name| (name == "SNOWTOOTH_PORT").then(|| "ski".to_owned()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "SNOWTOOTH_PORT", .. }));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(SnowtoothConfig::parse("server: [").is_err());
    }
}
