//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use secretctl_kube::SecretError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The Secret does not exist
    #[error("{message}")]
    #[diagnostic(code(secretctl::cli::not_found))]
    NotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Create hit an existing Secret
    #[error("{message}")]
    #[diagnostic(code(secretctl::cli::already_exists))]
    AlreadyExists {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Update carried a stale resourceVersion
    #[error("{message}")]
    #[diagnostic(code(secretctl::cli::conflict))]
    Conflict {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The request outlived --timeout
    #[error("Request timed out")]
    #[diagnostic(
        code(secretctl::cli::deadline),
        help("raise --timeout or requestTimeout in the config file")
    )]
    DeadlineExceeded,

    /// Manifest could not be used
    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(secretctl::cli::manifest))]
    Manifest { message: String },

    /// Invalid arguments
    #[error("{message}")]
    #[diagnostic(code(secretctl::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Configuration file or kubeconfig problem
    #[error("Configuration error: {message}")]
    #[diagnostic(code(secretctl::cli::config))]
    Config { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(secretctl::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(secretctl::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AlreadyExists { .. } => exit_codes::ALREADY_EXISTS,
            CliError::Conflict { .. } => exit_codes::CONFLICT,
            CliError::DeadlineExceeded => exit_codes::DEADLINE_EXCEEDED,
            CliError::Manifest { .. } => exit_codes::DATA_ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: None,
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an IO error naming the file involved
    pub fn io_at(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", path.display(), err),
        }
    }
}

impl From<SecretError> for CliError {
    fn from(err: SecretError) -> Self {
        let message = err.to_string();
        match err {
            SecretError::NotFound { namespace, .. } => CliError::NotFound {
                message,
                help: Some(format!(
                    "looked in namespace '{namespace}'; pass -n to pick another one"
                )),
            },
            SecretError::AlreadyExists { .. } => CliError::AlreadyExists {
                message,
                help: Some("use `secretctl update` to replace it".to_string()),
            },
            SecretError::Conflict { .. } => CliError::Conflict {
                message,
                help: Some(
                    "fetch the latest version with `secretctl get -o yaml` and retry".to_string(),
                ),
            },
            SecretError::DeadlineExceeded => CliError::DeadlineExceeded,
            SecretError::InvalidManifest(message) | SecretError::InvalidObject(message) => {
                CliError::Manifest { message }
            }
            SecretError::InvalidConfig(message) => CliError::Config { message },
            SecretError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            _ => CliError::Other { message },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
