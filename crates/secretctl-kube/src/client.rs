//! Cluster client capability and its Kubernetes implementation
//!
//! [`ObjectClient`] is the narrow set of verbs the manager needs from a
//! cluster: get, create, update (full replace) and delete, each scoped by an
//! [`OpContext`]. [`KubeObjectClient`] implements it on top of `kube::Api`
//! and translates API status codes into [`SecretError`] variants.

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, PostParams};
use kube::{Client, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::context::OpContext;
use crate::error::{Result, SecretError};
use crate::identity::ObjectKey;

/// Verbs consumed from the cluster for one resource kind
///
/// Implementations must be Send + Sync for use across async tasks.
#[async_trait]
pub trait ObjectClient<K>: Send + Sync {
    /// Fetch the object at `key`
    async fn get(&self, ctx: &OpContext, key: &ObjectKey) -> Result<K>;

    /// Create a new object
    async fn create(&self, ctx: &OpContext, object: &K) -> Result<()>;

    /// Replace an existing object
    async fn update(&self, ctx: &OpContext, object: &K) -> Result<()>;

    /// Delete the object identified by `object`'s metadata
    async fn delete(&self, ctx: &OpContext, object: &K) -> Result<()>;
}

/// Kind name for `K`, e.g. `Secret`
pub(crate) fn kind_of<K>() -> String
where
    K: Resource,
    K::DynamicType: Default,
{
    K::kind(&K::DynamicType::default()).into_owned()
}

/// API version for `K`, e.g. `v1`
pub(crate) fn api_version_of<K>() -> String
where
    K: Resource,
    K::DynamicType: Default,
{
    K::api_version(&K::DynamicType::default()).into_owned()
}

/// [`ObjectClient`] backed by a live Kubernetes API server
pub struct KubeObjectClient<K> {
    client: Client,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for KubeObjectClient<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> Debug for KubeObjectClient<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeObjectClient").finish_non_exhaustive()
    }
}

impl<K> KubeObjectClient<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    K::DynamicType: Default,
{
    /// Create with an existing client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    /// Create from the inferred environment (kubeconfig or in-cluster)
    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }

    /// Get the underlying Kubernetes client
    pub fn kube_client(&self) -> &Client {
        &self.client
    }

    fn api(&self, namespace: &str) -> Api<K> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl<K> ObjectClient<K> for KubeObjectClient<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + Debug
        + DeserializeOwned
        + Serialize
        + Send
        + Sync
        + 'static,
    K::DynamicType: Default,
{
    async fn get(&self, ctx: &OpContext, key: &ObjectKey) -> Result<K> {
        let kind = kind_of::<K>();
        debug!(%kind, namespace = %key.namespace, name = %key.name, "get");

        let api = self.api(&key.namespace);
        ctx.run(async {
            api.get(&key.name)
                .await
                .map_err(|e| SecretError::from_kube(e, &kind, key))
        })
        .await
    }

    async fn create(&self, ctx: &OpContext, object: &K) -> Result<()> {
        let key = ObjectKey::from_object(object)?;
        let kind = kind_of::<K>();
        debug!(%kind, namespace = %key.namespace, name = %key.name, "create");

        let api = self.api(&key.namespace);
        ctx.run(async {
            api.create(&PostParams::default(), object)
                .await
                .map(|_| ())
                .map_err(|e| SecretError::from_kube(e, &kind, &key))
        })
        .await
    }

    async fn update(&self, ctx: &OpContext, object: &K) -> Result<()> {
        let key = ObjectKey::from_object(object)?;
        let kind = kind_of::<K>();
        debug!(%kind, namespace = %key.namespace, name = %key.name, "replace");

        let api = self.api(&key.namespace);
        ctx.run(async {
            api.replace(&key.name, &PostParams::default(), object)
                .await
                .map(|_| ())
                .map_err(|e| SecretError::from_kube(e, &kind, &key))
        })
        .await
    }

    async fn delete(&self, ctx: &OpContext, object: &K) -> Result<()> {
        let key = ObjectKey::from_object(object)?;
        let kind = kind_of::<K>();
        debug!(%kind, namespace = %key.namespace, name = %key.name, "delete");

        let api = self.api(&key.namespace);
        ctx.run(async {
            api.delete(&key.name, &DeleteParams::default())
                .await
                .map(|_| ())
                .map_err(|e| SecretError::from_kube(e, &kind, &key))
        })
        .await
    }
}
