//! Configuration loading for the development host.
//!
//! The host reads `statement-host.yaml` from the working directory, or
//! the path named by `STATEMENT_HOST_CONFIG`. A missing file is not an
//! error: every field has a default.
//!
//! ```yaml
//! chaincode:
//!   name: statement_chaincode
//! logging:
//!   level: debug
//!   format: json
//! host:
//!   dump_state: true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use statement_chaincode::recorder::DEFAULT_CHAINCODE_NAME;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "STATEMENT_HOST_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "statement-host.yaml";

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

    /// An environment override holds an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// The environment variable.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Chaincode identity.
    #[serde(default)]
    pub chaincode: ChaincodeConfig,

    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Session behaviour.
    #[serde(default)]
    pub host: SessionConfig,
}

impl HostConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides:
    /// - `STATEMENT_LOG_LEVEL` overrides `logging.level`
    /// - `STATEMENT_LOG_FORMAT` overrides `logging.format`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.logging.apply_env_overrides()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if an override is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.logging.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Environment variable overriding `logging.level`.
pub const LOG_LEVEL_ENV: &str = "STATEMENT_LOG_LEVEL";

/// Environment variable overriding `logging.format`.
pub const LOG_FORMAT_ENV: &str = "STATEMENT_LOG_FORMAT";

/// Read a variable from the process environment.
fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve the config file path from the environment.
pub fn config_path() -> PathBuf {
    config_path_from(process_env)
}

/// Resolve the config file path, reading variables through `env`.
fn config_path_from(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    env(CONFIG_PATH_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Chaincode identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChaincodeConfig {
    /// Name recorded on the chaincode's log span and the mock ledger.
    #[serde(default = "default_chaincode_name")]
    pub name: String,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            name: default_chaincode_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error). `RUST_LOG`
    /// takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Apply `STATEMENT_LOG_LEVEL` and `STATEMENT_LOG_FORMAT`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for an unknown format.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(process_env)
    }

    fn apply_overrides_from(
        &mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = env(LOG_LEVEL_ENV) {
            self.level = val;
        }
        if let Some(val) = env(LOG_FORMAT_ENV) {
            self.format = LogFormat::parse(&val).ok_or(ConfigError::InvalidEnv {
                name: LOG_FORMAT_ENV,
                value: val,
            })?;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Session behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Print every committed key/value after the input is exhausted.
    #[serde(default)]
    pub dump_state: bool,
}

fn default_chaincode_name() -> String {
    DEFAULT_CHAINCODE_NAME.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HostConfig::default();
        assert_eq!(config.chaincode.name, "statement_chaincode");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.host.dump_state);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
chaincode:
  name: helloworld
logging:
  level: debug
  format: json
host:
  dump_state: true
";
        let config = HostConfig::parse(yaml);
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.chaincode.name, "helloworld");
            assert_eq!(c.logging.level, "debug");
            assert_eq!(c.logging.format, LogFormat::Json);
            assert!(c.host.dump_state);
        }
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let config = HostConfig::parse("logging:\n  level: warn\n");
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.logging.level, "warn");
            assert_eq!(c.logging.format, LogFormat::Pretty);
            assert_eq!(c.chaincode.name, "statement_chaincode");
        }
    }

    #[test]
    fn unknown_format_rejected() {
        let config = HostConfig::parse("logging:\n  format: xml\n");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn format_parse_is_case_insensitive() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("yaml"), None);
    }

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| {
            vars.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    fn yaml_logging() -> LoggingConfig {
        HostConfig::parse("logging:\n  level: debug\n  format: pretty\n")
            .map(|c| c.logging)
            .unwrap_or_default()
    }

    #[test]
    fn log_level_env_overrides_yaml() {
        let mut logging = yaml_logging();
        assert_eq!(logging.level, "debug");

        let result = logging.apply_overrides_from(env_of(&[(LOG_LEVEL_ENV, "trace")]));
        assert!(result.is_ok());
        assert_eq!(logging.level, "trace");
        assert_eq!(logging.format, LogFormat::Pretty);
    }

    #[test]
    fn log_format_env_overrides_yaml() {
        let mut logging = yaml_logging();

        let result = logging.apply_overrides_from(env_of(&[(LOG_FORMAT_ENV, "JSON")]));
        assert!(result.is_ok());
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(logging.level, "debug");
    }

    #[test]
    fn invalid_log_format_env_is_rejected() {
        let mut logging = yaml_logging();

        let result = logging.apply_overrides_from(env_of(&[(LOG_FORMAT_ENV, "xml")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { name: LOG_FORMAT_ENV, ref value }) if value == "xml"
        ));
        assert_eq!(logging.format, LogFormat::Pretty);
    }

    #[test]
    fn unset_env_leaves_yaml_values() {
        let mut logging = yaml_logging();
        assert!(logging.apply_overrides_from(env_of(&[])).is_ok());
        assert_eq!(logging, yaml_logging());
    }

    #[test]
    fn config_path_env_names_the_file() {
        let path = config_path_from(env_of(&[(CONFIG_PATH_ENV, "/etc/statement/host.yaml")]));
        assert_eq!(path, PathBuf::from("/etc/statement/host.yaml"));
    }

    #[test]
    fn config_path_defaults_to_working_directory() {
        assert_eq!(config_path_from(env_of(&[])), PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn from_file_applies_overrides_to_file_contents() {
        let dir = std::env::temp_dir().join(format!("statement-host-{}", std::process::id()));
        let path = dir.join("host.yaml");
        let written = std::fs::create_dir_all(&dir)
            .and_then(|()| std::fs::write(&path, "chaincode:\n  name: from_file\n"));
        assert!(written.is_ok());

        let config = HostConfig::from_file(&path);
        let _ = std::fs::remove_dir_all(&dir);

        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.chaincode.name, "from_file");
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = HostConfig::from_file(Path::new("/nonexistent/statement-host.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
