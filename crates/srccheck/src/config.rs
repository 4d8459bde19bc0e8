use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "srccheck.toml";

/// Written by `srccheck init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"[analyzer]
sources = ["."]
exclude = ["**/build/**", "**/.git/**"]
header_extensions = ["h"]
source_extensions = ["cpp"]

[rules.system-includes]
enabled = true
severity = "error"

[rules.header-guard]
enabled = true
severity = "error"

[rules.test-group]
enabled = true
severity = "error"

[rules.line-length]
enabled = true
severity = "error"
max = 140
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directories to scan, relative to the checked root.
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_header_extensions")]
    pub header_extensions: Vec<String>,

    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            exclude: Vec::new(),
            header_extensions: default_header_extensions(),
            source_extensions: default_source_extensions(),
        }
    }
}

fn default_sources() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_header_extensions() -> Vec<String> {
    vec!["h".to_string()]
}

fn default_source_extensions() -> Vec<String> {
    vec!["cpp".to_string()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub severity: Option<Severity>,

    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Negative or non-integer values fall back to `default`.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    Parse { message: String },
}
