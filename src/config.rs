use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Complete Cachegate configuration (loaded from TOML file)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CachegateConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Directory that overlap paths are displayed relative to (defaults to cwd)
    #[serde(default)]
    pub root: Option<String>,
}

/// `cachegate check` defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckConfig {
    /// Task manifest path
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Worker threads used to resolve tasks (0 = number of CPUs)
    #[serde(default)]
    pub jobs: usize,

    /// Exit with a non-zero status if any task is not cacheable
    #[serde(default)]
    pub fail_on_disabled: bool,

    /// Result format: text, json
    #[serde(default)]
    pub format: OutputFormat,
}

/// Result format for `cachegate check`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per task plus a summary
    #[default]
    Text,
    /// A single JSON document with tasks and summary
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            jobs: 0,
            fail_on_disabled: false,
            format: OutputFormat::Text,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_manifest() -> String {
    "tasks.kdl".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl CachegateConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: CachegateConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Generate example configuration as TOML string
    pub fn example() -> Result<String> {
        let config = CachegateConfig {
            workspace: WorkspaceConfig {
                root: Some(".".to_string()),
            },
            check: CheckConfig {
                manifest: "build/tasks.kdl".to_string(),
                jobs: 4,
                fail_on_disabled: false,
                format: OutputFormat::Text,
            },
            ..Default::default()
        };

        toml::to_string_pretty(&config).context("Failed to serialize example config")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.check.manifest.is_empty() {
            anyhow::bail!("check.manifest must be set");
        }

        if !["trace", "debug", "info", "warn", "error"]
            .contains(&self.observability.log_level.as_str())
        {
            anyhow::bail!("observability.log_level must be one of: trace, debug, info, warn, error");
        }

        if !["pretty", "compact", "json"].contains(&self.observability.log_format.as_str()) {
            anyhow::bail!("observability.log_format must be one of: pretty, compact, json");
        }

        if let Some(root) = &self.workspace.root {
            if root.is_empty() {
                anyhow::bail!("workspace.root must not be empty when set");
            }
        }

        Ok(())
    }
}
