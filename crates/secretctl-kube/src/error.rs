//! Error types for secretctl-kube

use thiserror::Error;

use crate::identity::ObjectKey;

/// Result type for secretctl-kube operations
pub type Result<T> = std::result::Result<T, SecretError>;

/// Errors that can occur while reading or writing cluster objects
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SecretError {
    /// No object with this identity exists
    #[error("{kind} '{namespace}/{name}' not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    /// Create was called for an identity that is already taken
    #[error("{kind} '{namespace}/{name}' already exists")]
    AlreadyExists {
        kind: String,
        namespace: String,
        name: String,
    },

    /// Update carried a stale version token
    #[error("conflict updating {kind} '{namespace}/{name}': {message}\nHint: fetch the latest version and retry")]
    Conflict {
        kind: String,
        namespace: String,
        name: String,
        message: String,
    },

    /// Any other failure reported by the Kubernetes client
    #[error("Kubernetes API error: {0}")]
    Transport(#[from] kube::Error),

    /// The caller's deadline passed before the request completed
    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    /// The object cannot be addressed (missing namespace or name)
    #[error("invalid object: {0}")]
    InvalidObject(String),

    /// A manifest could not be turned into an object
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SecretError {
    fn from(e: serde_json::Error) -> Self {
        SecretError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for SecretError {
    fn from(e: serde_yaml::Error) -> Self {
        SecretError::Serialization(e.to_string())
    }
}

impl SecretError {
    /// Build a `NotFound` error for an identity
    pub fn not_found(kind: &str, key: &ObjectKey) -> Self {
        SecretError::NotFound {
            kind: kind.to_string(),
            namespace: key.namespace.clone(),
            name: key.name.clone(),
        }
    }

    /// Build an `AlreadyExists` error for an identity
    pub fn already_exists(kind: &str, key: &ObjectKey) -> Self {
        SecretError::AlreadyExists {
            kind: kind.to_string(),
            namespace: key.namespace.clone(),
            name: key.name.clone(),
        }
    }

    /// Build a `Conflict` error for an identity
    pub fn conflict(kind: &str, key: &ObjectKey, message: impl Into<String>) -> Self {
        SecretError::Conflict {
            kind: kind.to_string(),
            namespace: key.namespace.clone(),
            name: key.name.clone(),
            message: message.into(),
        }
    }

    /// Classify a raw client error for the object at `key`
    ///
    /// 404 becomes `NotFound`, 409 with reason `AlreadyExists` becomes
    /// `AlreadyExists`, any other 409 becomes `Conflict`. Everything else is
    /// kept as `Transport` with the original error attached.
    pub fn from_kube(err: kube::Error, kind: &str, key: &ObjectKey) -> Self {
        match err {
            kube::Error::Api(resp) if resp.code == 404 => Self::not_found(kind, key),
            kube::Error::Api(resp) if resp.code == 409 && resp.reason == "AlreadyExists" => {
                Self::already_exists(kind, key)
            }
            kube::Error::Api(resp) if resp.code == 409 => Self::conflict(kind, key, resp.message),
            other => SecretError::Transport(other),
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, SecretError::NotFound { .. })
    }

    /// Check if this is an already-exists error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, SecretError::AlreadyExists { .. })
    }

    /// Check if this is an optimistic-concurrency conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, SecretError::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str, message: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: message.to_string(),
            reason: reason.to_string(),
            code,
        })
    }

    fn key() -> ObjectKey {
        ObjectKey::new("ns1", "s1")
    }

    #[test]
    fn test_404_is_not_found() {
        let err = SecretError::from_kube(api_error(404, "NotFound", "gone"), "Secret", &key());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Secret 'ns1/s1' not found");
    }

    #[test]
    fn test_409_already_exists() {
        let err = SecretError::from_kube(
            api_error(409, "AlreadyExists", "secrets \"s1\" already exists"),
            "Secret",
            &key(),
        );
        assert!(err.is_already_exists());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_409_conflict_keeps_message() {
        let err = SecretError::from_kube(
            api_error(409, "Conflict", "the object has been modified"),
            "Secret",
            &key(),
        );
        match err {
            SecretError::Conflict { message, .. } => {
                assert_eq!(message, "the object has been modified")
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_other_status_is_transport() {
        let err = SecretError::from_kube(api_error(403, "Forbidden", "nope"), "Secret", &key());
        assert!(matches!(err, SecretError::Transport(kube::Error::Api(ref r)) if r.code == 403));
        assert!(!err.is_not_found());
    }
}
