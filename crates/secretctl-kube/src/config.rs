//! Client configuration
//!
//! Stored in `~/.config/secretctl/config.yaml`. Every field is optional; a
//! missing file at the default location means defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use kube::config::KubeConfigOptions;

use crate::context::OpContext;
use crate::error::{Result, SecretError};

/// Namespace used when neither the command line nor the file names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Kubeconfig context (current context or in-cluster config when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Default namespace for commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Default per-operation deadline
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SecretError::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SecretError::InvalidConfig(e.to_string()))
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default configuration path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SecretError::InvalidConfig("could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("secretctl").join("config.yaml"))
    }

    /// Namespace to use, preferring an explicit override
    pub fn namespace_or_default(&self, namespace: Option<&str>) -> String {
        namespace
            .or(self.namespace.as_deref())
            .unwrap_or(DEFAULT_NAMESPACE)
            .to_string()
    }

    /// Context for one operation, preferring an explicit timeout
    pub fn op_context(&self, timeout: Option<Duration>) -> OpContext {
        OpContext::from_timeout(timeout.or(self.request_timeout))
    }

    /// Build a Kubernetes client for the configured context
    pub async fn connect(&self) -> Result<kube::Client> {
        let config = match &self.context {
            Some(context) => {
                let options = KubeConfigOptions {
                    context: Some(context.clone()),
                    ..Default::default()
                };
                kube::Config::from_kubeconfig(&options).await.map_err(|e| {
                    SecretError::InvalidConfig(format!("kubeconfig context '{context}': {e}"))
                })?
            }
            None => kube::Config::infer()
                .await
                .map_err(|e| SecretError::InvalidConfig(format!("no cluster configuration: {e}")))?,
        };
        Ok(kube::Client::try_from(config)?)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}
