//! CLI commands

pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use std::path::Path;
use std::time::Duration;

use k8s_openapi::api::core::v1::Secret;
use secretctl_kube::{
    ClientConfig, OpContext, ResourceManager, SecretManager, default_namespace, parse_manifest,
};

use tracing::debug;

use crate::error::{CliError, Result};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Session {
    config: ClientConfig,
    timeout: Option<Duration>,
}

impl Session {
    pub fn new(config: ClientConfig, timeout: Option<Duration>) -> Self {
        Self { config, timeout }
    }

    /// Namespace to use, `-n` first, then the config file, then `default`
    pub fn namespace(&self, explicit: Option<&str>) -> String {
        self.config.namespace_or_default(explicit)
    }

    /// Deadline for the next request; the clock starts now
    pub fn op_context(&self) -> OpContext {
        self.config.op_context(self.timeout)
    }

    /// Connect to the cluster
    pub async fn connect(&self) -> Result<SecretManager> {
        debug!(context = ?self.config.context, timeout = ?self.timeout, "connecting");
        let client = self.config.connect().await?;
        Ok(ResourceManager::for_cluster(client))
    }
}

/// Read a Secret manifest from disk
///
/// The manifest's own namespace wins over the fallback; an explicit `-n`
/// that disagrees with it is rejected.
pub fn load_manifest(path: &Path, explicit: Option<&str>, fallback: &str) -> Result<Secret> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io_at(path, e))?;
    let mut secret: Secret = parse_manifest(&content)?;

    if let (Some(explicit), Some(declared)) = (explicit, secret.metadata.namespace.as_deref()) {
        if !declared.is_empty() && explicit != declared {
            return Err(CliError::usage_with_help(
                format!(
                    "namespace '{explicit}' does not match the manifest's namespace '{declared}'"
                ),
                "drop -n or edit metadata.namespace",
            ));
        }
    }

    default_namespace(&mut secret, fallback);
    Ok(secret)
}

/// Secret identity for status messages
pub fn display_key(secret: &Secret) -> String {
    format!(
        "{}/{}",
        secret.metadata.namespace.as_deref().unwrap_or_default(),
        secret.metadata.name.as_deref().unwrap_or_default()
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const WITH_NAMESPACE: &str =
        "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s1\n  namespace: prod\nstringData:\n  a: b\n";
    const WITHOUT_NAMESPACE: &str =
        "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s1\nstringData:\n  a: b\n";

    #[test]
    fn test_manifest_namespace_wins_over_fallback() {
        let file = manifest_file(WITH_NAMESPACE);
        let secret = load_manifest(file.path(), None, "default").unwrap();
        assert_eq!(display_key(&secret), "prod/s1");
    }

    #[test]
    fn test_fallback_fills_missing_namespace() {
        let file = manifest_file(WITHOUT_NAMESPACE);
        let secret = load_manifest(file.path(), Some("team-a"), "team-a").unwrap();
        assert_eq!(display_key(&secret), "team-a/s1");
    }

    #[test]
    fn test_explicit_namespace_mismatch() {
        let file = manifest_file(WITH_NAMESPACE);
        let err = load_manifest(file.path(), Some("staging"), "staging").unwrap_err();
        assert!(matches!(err, CliError::Usage { .. }));
        assert!(err.to_string().contains("'staging'"));
    }

    #[test]
    fn test_explicit_namespace_matching_is_fine() {
        let file = manifest_file(WITH_NAMESPACE);
        assert!(load_manifest(file.path(), Some("prod"), "prod").is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = load_manifest(&path, None, "default").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_wrong_kind_is_manifest_error() {
        let file = manifest_file("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: c\n");
        let err = load_manifest(file.path(), None, "default").unwrap_err();
        assert!(matches!(err, CliError::Manifest { .. }));
    }

    #[test]
    fn test_session_namespace_and_context() {
        let config = ClientConfig {
            namespace: Some("team-a".to_string()),
            ..Default::default()
        };
        let session = Session::new(config, Some(Duration::from_secs(5)));
        assert_eq!(session.namespace(None), "team-a");
        assert_eq!(session.namespace(Some("x")), "x");
    }

    #[tokio::test]
    async fn test_session_op_context_uses_timeout() {
        let session = Session::new(ClientConfig::default(), Some(Duration::from_secs(5)));
        assert!(session.op_context().deadline().is_some());

        let session = Session::new(ClientConfig::default(), None);
        assert!(session.op_context().deadline().is_none());
    }
}
