mod figma;
mod server;
mod traversal;

pub use figma::*;
pub use server::*;
pub use traversal::*;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::node::NodeType;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub figma: FigmaConfig,
    /// Defaults for tool calls that leave a limit unspecified.
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for missing keys.
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("parsing {path}: {e}")))
    }

    /// Load from file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.figma.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "figma.base_url".into(),
                message: "base_url must not be empty".into(),
            });
        }

        if self.figma.token().is_none() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "figma.token_env".into(),
                message: format!(
                    "environment variable {} is unset; upstream calls will be rejected",
                    self.figma.token_env
                ),
            });
        }

        if self.traversal.page_size == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "traversal.page_size".into(),
                message: "page_size must be at least 1".into(),
            });
        }

        for (field, value) in [
            ("traversal.max_memory_mb", self.traversal.max_memory_mb),
            ("traversal.max_response_size", self.traversal.max_response_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: field.into(),
                    message: format!("budget must be a positive number, got {value}"),
                });
            }
        }

        if let Some(types) = &self.traversal.node_types {
            if types.is_empty() {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "traversal.node_types".into(),
                    message: "node_types must be omitted or non-empty".into(),
                });
            }
            for t in types {
                if matches!(t, NodeType::Other(_)) {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Error,
                        field: "traversal.node_types".into(),
                        message: format!("unrecognized node type {t}"),
                    });
                }
            }
        }

        if self.traversal.exclude_props.iter().any(|p| p == "id" || p == "type") {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "traversal.exclude_props".into(),
                message: "`id` and `type` are always kept and will be ignored".into(),
            });
        }

        errors
    }
}
