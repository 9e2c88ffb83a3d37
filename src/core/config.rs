use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_users_path")]
    pub users_path: PathBuf,
    #[serde(default = "default_legacy_friends_path")]
    pub legacy_friends_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_path: default_users_path(),
            legacy_friends_path: default_legacy_friends_path(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_provider_endpoint(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_users_path() -> PathBuf {
    PathBuf::from("data/users.json")
}

fn default_legacy_friends_path() -> PathBuf {
    PathBuf::from("data/friends.json")
}

fn default_provider_endpoint() -> String {
    "https://leetcode.com/graphql".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.storage.users_path.as_os_str().is_empty() {
            bail!("users_path must not be empty");
        }

        if self.provider.endpoint.is_empty() {
            bail!("provider endpoint must not be empty");
        }

        if self.provider.timeout_secs == 0 {
            bail!("provider timeout_secs must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = parse("[server]\nport = 5000\n").unwrap();

        assert_eq!(config.server.port, 5000);
        assert!(config.server.num_threads > 0);
        assert_eq!(config.storage.users_path, PathBuf::from("data/users.json"));
        assert_eq!(config.provider.endpoint, "https://leetcode.com/graphql");
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [server]
            port = 8080
            num_threads = 2

            [storage]
            users_path = "/tmp/users.json"
            legacy_friends_path = "/tmp/friends.json"

            [provider]
            endpoint = "http://localhost:9000/graphql"
            timeout_secs = 3

            [logging]
            level = "debug"
            format = "console"
            console = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.num_threads, 2);
        assert_eq!(config.provider.endpoint, "http://localhost:9000/graphql");
        assert_eq!(config.provider.timeout_secs, 3);
        assert!(config.logging.console);
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(parse("[server]\nport = 0\n").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = "[server]\nport = 5000\n[provider]\ntimeout_secs = 0\n";
        assert!(parse(toml).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let toml = "[server]\nport = 5000\n[logging]\nlevel = \"verbose\"\n";
        assert!(parse(toml).is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let toml = "[server]\nport = 5000\n[logging]\nformat = \"xml\"\n";
        assert!(parse(toml).is_err());
    }
}
