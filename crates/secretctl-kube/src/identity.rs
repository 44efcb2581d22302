//! Object identity within a cluster

use std::fmt;

use kube::Resource;

use crate::error::{Result, SecretError};

/// Namespace and name addressing one object of a given kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Read the identity out of an object's metadata
    ///
    /// Fails with `InvalidObject` when either field is missing or empty.
    pub fn from_object<K: Resource>(object: &K) -> Result<Self> {
        let meta = object.meta();
        let name = meta
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| SecretError::InvalidObject("metadata.name is required".to_string()))?;
        let namespace = meta
            .namespace
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                SecretError::InvalidObject(format!("metadata.namespace is required for '{name}'"))
            })?;
        Ok(Self::new(namespace, name))
    }

    /// Build an object carrying only this identity
    pub fn to_object<K: Resource + Default>(&self) -> K {
        let mut object = K::default();
        let meta = object.meta_mut();
        meta.name = Some(self.name.clone());
        meta.namespace = Some(self.namespace.clone());
        object
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::Secret;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn test_display() {
        assert_eq!(ObjectKey::new("ns1", "s1").to_string(), "ns1/s1");
    }

    #[test]
    fn test_from_object() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("db".to_string()),
                namespace: Some("prod".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ObjectKey::from_object(&secret).unwrap(), ObjectKey::new("prod", "db"));
    }

    #[test]
    fn test_from_object_requires_namespace() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("db".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = ObjectKey::from_object(&secret).unwrap_err();
        assert!(matches!(err, SecretError::InvalidObject(msg) if msg.contains("namespace")));
    }

    #[test]
    fn test_from_object_rejects_empty_name() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some(String::new()),
                namespace: Some("prod".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(ObjectKey::from_object(&secret).is_err());
    }

    #[test]
    fn test_to_object_is_identity_only() {
        let secret: Secret = ObjectKey::new("ns1", "s1").to_object();
        assert_eq!(secret.metadata.name.as_deref(), Some("s1"));
        assert_eq!(secret.metadata.namespace.as_deref(), Some("ns1"));
        assert!(secret.data.is_none());
        assert!(secret.metadata.resource_version.is_none());
    }
}
