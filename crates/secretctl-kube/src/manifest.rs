//! Manifest parsing
//!
//! Reads a single YAML or JSON document into a typed object, checking
//! `apiVersion` and `kind` up front so a mismatched manifest fails with a
//! readable message instead of a serde error.

use kube::Resource;
use serde::de::DeserializeOwned;

use crate::client::{api_version_of, kind_of};
use crate::error::{Result, SecretError};

/// Parse a manifest into `K`
pub fn parse_manifest<K>(content: &str) -> Result<K>
where
    K: Resource + DeserializeOwned,
    K::DynamicType: Default,
{
    let value: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| SecretError::InvalidManifest(e.to_string()))?;

    if !value.is_mapping() {
        return Err(SecretError::InvalidManifest(
            "expected a single object".to_string(),
        ));
    }

    let expected_kind = kind_of::<K>();
    let expected_version = api_version_of::<K>();

    match value.get("kind").and_then(|v| v.as_str()) {
        Some(kind) if kind == expected_kind => {}
        Some(kind) => {
            return Err(SecretError::InvalidManifest(format!(
                "expected kind '{expected_kind}', found '{kind}'"
            )));
        }
        None => {
            return Err(SecretError::InvalidManifest("missing 'kind'".to_string()));
        }
    }

    match value.get("apiVersion").and_then(|v| v.as_str()) {
        Some(version) if version == expected_version => {}
        Some(version) => {
            return Err(SecretError::InvalidManifest(format!(
                "expected apiVersion '{expected_version}', found '{version}'"
            )));
        }
        None => {
            return Err(SecretError::InvalidManifest(
                "missing 'apiVersion'".to_string(),
            ));
        }
    }

    serde_yaml::from_value(value).map_err(|e| SecretError::InvalidManifest(e.to_string()))
}

/// Fill in `metadata.namespace` when the manifest left it out
pub fn default_namespace<K: Resource>(object: &mut K, namespace: &str) {
    let meta = object.meta_mut();
    if meta.namespace.as_deref().is_none_or(str::is_empty) {
        meta.namespace = Some(namespace.to_string());
    }
}
