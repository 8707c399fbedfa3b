//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::amazon::regions::Region;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading: defaults, then a TOML
/// file, then environment variables, then CLI flags on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Marketplace override; None derives the domain from the product URL
    #[serde(default)]
    pub region: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between review-page fetches in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Number of reviews to fetch
    #[serde(default = "default_review_count")]
    pub review_count: usize,

    /// Review sort preference ("helpful", "recent", "rating")
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_delay_jitter_ms() -> u64 {
    1000
}

fn default_review_count() -> usize {
    10
}

fn default_sort() -> String {
    "helpful".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            review_count: default_review_count(),
            sort: default_sort(),
            format: OutputFormat::Json,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-product").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(region) = std::env::var("AMZ_REGION") {
            if let Ok(r) = region.parse() {
                self.region = Some(r);
            }
        }

        if let Ok(proxy) = std::env::var("AMZ_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("AMZ_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Unknown format: {}. Use: json, table", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serializes tests that mutate AMZ_* environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.region.is_none());
        assert!(config.proxy.is_none());
        assert_eq!(config.delay_ms, 2000);
        assert_eq!(config.delay_jitter_ms, 1000);
        assert_eq!(config.review_count, 10);
        assert_eq!(config.sort, "helpful");
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Table.to_string(), "table");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            region = "uk"
            delay_ms = 3000
            review_count = 50
            sort = "recent"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.region, Some(Region::Uk));
        assert_eq!(config.delay_ms, 3000);
        assert_eq!(config.review_count, 50);
        assert_eq!(config.sort, "recent");
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            region = "de"
            proxy = "socks5://localhost:1080"
            delay_ms = 5000
            delay_jitter_ms = 2000
            review_count = 100
            sort = "rating"
            format = "table"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.region, Some(Region::De));
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.delay_ms, 5000);
        assert_eq!(config.delay_jitter_ms, 2000);
        assert_eq!(config.review_count, 100);
        assert_eq!(config.sort, "rating");
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            region = "fr"
            delay_ms = 4000
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.region, Some(Region::Fr));
        assert_eq!(config.delay_ms, 4000);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            region = "jp"
            review_count = 30
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.region, Some(Region::Jp));
        assert_eq!(config.review_count, 30);
    }

    #[test]
    fn test_config_with_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let orig_region = std::env::var("AMZ_REGION").ok();
        let orig_proxy = std::env::var("AMZ_PROXY").ok();
        let orig_delay = std::env::var("AMZ_DELAY").ok();

        std::env::set_var("AMZ_REGION", "au");
        std::env::set_var("AMZ_PROXY", "http://proxy:8080");
        std::env::set_var("AMZ_DELAY", "5000");

        let config = Config::new().with_env();
        assert_eq!(config.region, Some(Region::Au));
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert_eq!(config.delay_ms, 5000);

        match orig_region {
            Some(v) => std::env::set_var("AMZ_REGION", v),
            None => std::env::remove_var("AMZ_REGION"),
        }
        match orig_proxy {
            Some(v) => std::env::set_var("AMZ_PROXY", v),
            None => std::env::remove_var("AMZ_PROXY"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("AMZ_DELAY", v),
            None => std::env::remove_var("AMZ_DELAY"),
        }
    }

    #[test]
    fn test_config_with_env_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        let orig_region = std::env::var("AMZ_REGION").ok();
        let orig_delay = std::env::var("AMZ_DELAY").ok();

        std::env::set_var("AMZ_REGION", "invalid_region");
        std::env::set_var("AMZ_DELAY", "not_a_number");

        let config = Config::new().with_env();
        // Invalid values are ignored, keeping defaults
        assert!(config.region.is_none());
        assert_eq!(config.delay_ms, 2000);

        match orig_region {
            Some(v) => std::env::set_var("AMZ_REGION", v),
            None => std::env::remove_var("AMZ_REGION"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("AMZ_DELAY", v),
            None => std::env::remove_var("AMZ_DELAY"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            region: Some(Region::Uk),
            proxy: Some("socks5://localhost:1080".to_string()),
            delay_ms: 3000,
            delay_jitter_ms: 1500,
            review_count: 50,
            sort: "recent".to_string(),
            format: OutputFormat::Table,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.region, config.region);
        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.delay_ms, config.delay_ms);
        assert_eq!(parsed.review_count, config.review_count);
        assert_eq!(parsed.sort, config.sort);
        assert_eq!(parsed.format, config.format);
    }
}
