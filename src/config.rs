//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base origin of the store
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of products to collect (0 = no limit)
    #[serde(default)]
    pub max_products: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// SQLite database to upsert scraped products into
    #[serde(default)]
    pub database: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://www.lojamaeto.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            max_products: 0,
            format: OutputFormat::Table,
            database: None,
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
            let xdg_config = config_dir.join("maeto-crawler").join("config.toml");
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
        if let Ok(base_url) = std::env::var("MAETO_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("MAETO_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("MAETO_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(database) = std::env::var("MAETO_DATABASE") {
            self.database = Some(PathBuf::from(database));
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://www.lojamaeto.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_products, 0);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.proxy.is_none());
        assert!(config.database.is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            base_url = "https://staging.lojamaeto.com"
            timeout_secs = 10
            max_products = 50
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://staging.lojamaeto.com");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_products, 50);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            base_url = "https://www.lojamaeto.com"
            proxy = "socks5://localhost:1080"
            timeout_secs = 15
            max_products = 100
            format = "csv"
            database = "products.db"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.database, Some(PathBuf::from("products.db")));
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            timeout_secs = 5
            max_products = 10
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_products, 10);
        // Unset fields fall back to defaults
        assert_eq!(config.base_url, "https://www.lojamaeto.com");
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_with_env() {
        // Save original env vars
        let orig_base = std::env::var("MAETO_BASE_URL").ok();
        let orig_proxy = std::env::var("MAETO_PROXY").ok();
        let orig_timeout = std::env::var("MAETO_TIMEOUT").ok();

        std::env::set_var("MAETO_BASE_URL", "https://mirror.lojamaeto.com");
        std::env::set_var("MAETO_PROXY", "http://proxy:8080");
        std::env::set_var("MAETO_TIMEOUT", "12");

        let config = Config::new().with_env();
        assert_eq!(config.base_url, "https://mirror.lojamaeto.com");
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert_eq!(config.timeout_secs, 12);

        // Restore original env vars
        match orig_base {
            Some(v) => std::env::set_var("MAETO_BASE_URL", v),
            None => std::env::remove_var("MAETO_BASE_URL"),
        }
        match orig_proxy {
            Some(v) => std::env::set_var("MAETO_PROXY", v),
            None => std::env::remove_var("MAETO_PROXY"),
        }
        match orig_timeout {
            Some(v) => std::env::set_var("MAETO_TIMEOUT", v),
            None => std::env::remove_var("MAETO_TIMEOUT"),
        }
    }

    #[test]
    fn test_config_with_env_invalid_timeout() {
        let orig_timeout = std::env::var("MAETO_TIMEOUT").ok();

        std::env::set_var("MAETO_TIMEOUT", "not_a_number");

        let config = Config::new().with_env();
        assert_eq!(config.timeout_secs, 30);

        match orig_timeout {
            Some(v) => std::env::set_var("MAETO_TIMEOUT", v),
            None => std::env::remove_var("MAETO_TIMEOUT"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            base_url: "https://www.lojamaeto.com".to_string(),
            proxy: Some("socks5://localhost:1080".to_string()),
            timeout_secs: 20,
            max_products: 25,
            format: OutputFormat::Json,
            database: Some(PathBuf::from("out.db")),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.base_url, config.base_url);
        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
        assert_eq!(parsed.max_products, config.max_products);
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.database, config.database);
    }
}
