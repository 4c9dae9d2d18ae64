//! Configuration management for stmtgrid
//!
//! Loads and validates the YAML configuration: where the server listens,
//! which extraction service receives uploads, and how the grid behaves.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed to call the JSON API cross-site
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Extraction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Base URL; uploads are posted to `<endpoint>/upload`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds (None waits indefinitely)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://virtuous-celebration-production.up.railway.app".to_string()
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { max_bytes: default_max_bytes() }
    }
}

fn default_max_bytes() -> usize {
    20 * 1024 * 1024
}

/// How a new upload combines with rows already in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Add the new rows after the existing ones
    Append,
    /// Discard existing rows and keep only the new ones
    Replace,
}

impl Default for MergeMode {
    fn default() -> Self {
        MergeMode::Append
    }
}

impl std::str::FromStr for MergeMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(MergeMode::Append),
            "replace" => Ok(MergeMode::Replace),
            _ => Err(format!("Invalid merge mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMode::Append => write!(f, "append"),
            MergeMode::Replace => write!(f, "replace"),
        }
    }
}

/// Grid behaviour and page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub merge_mode: MergeMode,
    #[serde(default = "default_page_title")]
    pub page_title: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            merge_mode: MergeMode::Append,
            page_title: default_page_title(),
        }
    }
}

fn default_page_title() -> String {
    "Statement Extractor".to_string()
}

/// Currency display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol prefixed to formatted amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_symbol() -> String {
    "Rs".to_string()
}

fn default_decimal_places() -> usize {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().into_owned(),
            },
            _ => ConfigError::IoError,
        })?;
        Self::from_yaml(&content)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub async fn load_or_default(path: &Path) -> ConfigResult<(Self, bool)> {
        match Self::load(path).await {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::FileNotFound { .. }) => Ok((Self::default(), false)),
            Err(e) => Err(e),
        }
    }

    /// Parse and validate YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let endpoint = self.extractor.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "extractor.endpoint".to_string(),
                reason: "Endpoint must be an absolute http(s) URL".to_string(),
            });
        }

        if self.extractor.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "extractor.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0 or left unset".to_string(),
            });
        }

        if self.upload.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.max_bytes".to_string(),
                reason: "Upload limit must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 6 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 6".to_string(),
            });
        }

        Ok(())
    }

    /// Default configuration file contents
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full URL the upload is posted to
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.extractor.endpoint.trim().trim_end_matches('/'))
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
