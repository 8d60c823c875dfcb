use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable pointing at the configuration file.
pub const CONFIG_PATH_ENV: &str = "RENTSPLIT_CONFIG_PATH";
/// Configuration file read when [`CONFIG_PATH_ENV`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "rentsplit.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_rooms")]
    pub max_rooms: usize,
    #[serde(default = "default_max_occupants_per_room")]
    pub max_occupants_per_room: usize,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_rooms: default_max_rooms(),
            max_occupants_per_room: default_max_occupants_per_room(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => {
                Err(anyhow::anyhow!("Unknown log format '{other}', expected 'json' or 'pretty'"))
            }
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directives, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::default(), filter: default_log_filter() }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RentSplitConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the configuration was read from, `None` when running on defaults
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl RentSplitConfig {
    /// Loads the file named by `RENTSPLIT_CONFIG_PATH` (or `rentsplit.toml`)
    /// and applies environment overrides.
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Ok(Self::load_from(Path::new(&config_path))?.apply_env_overrides())
    }

    /// Reads `path`. A missing file yields the defaults; an unreadable or
    /// malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read configuration file '{}'", path.display())
                });
            }
        };

        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse configuration file '{}'", path.display()))?;
        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `RENTSPLIT_*` overrides read through `lookup`. Values that do not
    /// parse are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("RENTSPLIT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("RENTSPLIT_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(max_rooms) = lookup("RENTSPLIT_MAX_ROOMS").and_then(|v| v.parse().ok()) {
            self.limits.max_rooms = max_rooms;
        }
        if let Some(max_occupants) =
            lookup("RENTSPLIT_MAX_OCCUPANTS_PER_ROOM").and_then(|v| v.parse().ok())
        {
            self.limits.max_occupants_per_room = max_occupants;
        }
        if let Some(max_body_bytes) =
            lookup("RENTSPLIT_MAX_BODY_BYTES").and_then(|v| v.parse().ok())
        {
            self.limits.max_body_bytes = max_body_bytes;
        }
        if let Some(format) = lookup("RENTSPLIT_LOG_FORMAT").and_then(|v| v.parse().ok()) {
            self.logging.format = format;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_max_rooms() -> usize {
    100
}
fn default_max_occupants_per_room() -> usize {
    50
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}
fn default_log_filter() -> String {
    "rentsplit_api=info,rentsplit_calculator=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_uses_defaults() {
        let config = RentSplitConfig::from_toml_str("").unwrap();
        assert_eq!(config, RentSplitConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = RentSplitConfig::from_toml_str(
            r#"
[server]
port = 8080

[limits]
max_rooms = 12

[logging]
format = "pretty"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.limits.max_rooms, 12);
        assert_eq!(config.limits.max_occupants_per_room, 50);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(RentSplitConfig::from_toml_str("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            RentSplitConfig::load_from(Path::new("/definitely/not/here/rentsplit.toml")).unwrap();
        assert_eq!(config.loaded_from, None);
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn overrides_replace_parsed_values_only() {
        let env: HashMap<&str, &str> = [
            ("RENTSPLIT_HOST", "0.0.0.0"),
            ("RENTSPLIT_PORT", "not-a-port"),
            ("RENTSPLIT_MAX_OCCUPANTS_PER_ROOM", "4"),
            ("RENTSPLIT_LOG_FORMAT", "Pretty"),
        ]
        .into_iter()
        .collect();

        let config = RentSplitConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.limits.max_occupants_per_room, 4);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn body_limit_can_be_overridden() {
        let config = RentSplitConfig::default().apply_overrides(|key| {
            (key == "RENTSPLIT_MAX_BODY_BYTES").then(|| "1024".to_string())
        });
        assert_eq!(config.limits.max_body_bytes, 1024);

        let config = RentSplitConfig::default()
            .apply_overrides(|key| (key == "RENTSPLIT_MAX_BODY_BYTES").then(|| "-1".to_string()));
        assert_eq!(config.limits.max_body_bytes, default_max_body_bytes());
    }
}
