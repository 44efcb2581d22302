//! Resource manager: get/create/update/delete for one namespaced kind
//!
//! The manager adds nothing between the caller and the injected
//! [`ObjectClient`] except an audit record after each successful create or
//! update. Errors come back exactly as the client reported them; there is no
//! retry and no caching.
//!
//! Delete does not log. Create and update do.

use std::sync::Arc;

use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::core::v1::Secret;
use kube::{Client, Resource};

use crate::client::{KubeObjectClient, ObjectClient, api_version_of, kind_of};
use crate::context::OpContext;
use crate::error::Result;
use crate::identity::ObjectKey;
use crate::logger::{Logger, TracingLogger};

/// Thin façade over an [`ObjectClient`] and a [`Logger`]
pub struct ResourceManager<K> {
    client: Arc<dyn ObjectClient<K>>,
    logger: Arc<dyn Logger>,
}

/// Manager for core/v1 Secrets
pub type SecretManager = ResourceManager<Secret>;

impl<K> Clone for ResourceManager<K> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            logger: Arc::clone(&self.logger),
        }
    }
}

impl<K> std::fmt::Debug for ResourceManager<K>
where
    K: Resource,
    K::DynamicType: Default,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("kind", &kind_of::<K>())
            .finish_non_exhaustive()
    }
}

impl<K> ResourceManager<K>
where
    K: Resource<Scope = NamespaceResourceScope> + Default + Send + Sync + 'static,
    K::DynamicType: Default,
{
    pub fn new(client: Arc<dyn ObjectClient<K>>, logger: Arc<dyn Logger>) -> Self {
        Self { client, logger }
    }

    /// Fetch the current object
    pub async fn get(&self, ctx: &OpContext, namespace: &str, name: &str) -> Result<K> {
        self.client
            .get(ctx, &ObjectKey::new(namespace, name))
            .await
    }

    /// Create a new object and record it
    pub async fn create(&self, ctx: &OpContext, object: &K) -> Result<()> {
        self.client.create(ctx, object).await?;
        self.record("Create successfully", object);
        Ok(())
    }

    /// Replace an existing object and record it
    pub async fn update(&self, ctx: &OpContext, object: &K) -> Result<()> {
        self.client.update(ctx, object).await?;
        self.record("Update successfully", object);
        Ok(())
    }

    /// Delete by identity
    pub async fn delete(&self, ctx: &OpContext, namespace: &str, name: &str) -> Result<()> {
        let object: K = ObjectKey::new(namespace, name).to_object();
        self.client.delete(ctx, &object).await
    }

    fn record(&self, message: &str, object: &K) {
        let kind = kind_of::<K>();
        let api_version = api_version_of::<K>();
        let meta = object.meta();
        self.logger.info(
            message,
            &[
                ("kind", kind.as_str()),
                ("apiVersion", api_version.as_str()),
                ("namespace", meta.namespace.as_deref().unwrap_or_default()),
                ("name", meta.name.as_deref().unwrap_or_default()),
            ],
        );
    }
}

impl<K> ResourceManager<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Default
        + Clone
        + std::fmt::Debug
        + serde::de::DeserializeOwned
        + serde::Serialize
        + Send
        + Sync
        + 'static,
    K::DynamicType: Default,
{
    /// Manager talking to a live cluster, logging through `tracing`
    pub fn for_cluster(client: Client) -> Self {
        Self::new(
            Arc::new(KubeObjectClient::<K>::new(client)),
            Arc::new(TracingLogger),
        )
    }
}

/// Secret operations, for callers that want to depend on the capability
/// rather than on [`SecretManager`] itself
#[async_trait]
pub trait SecretManagers: Send + Sync {
    async fn get_secret(&self, ctx: &OpContext, namespace: &str, name: &str) -> Result<Secret>;

    async fn create_secret(&self, ctx: &OpContext, secret: &Secret) -> Result<()>;

    async fn update_secret(&self, ctx: &OpContext, secret: &Secret) -> Result<()>;

    async fn delete_secret(&self, ctx: &OpContext, namespace: &str, name: &str) -> Result<()>;
}

#[async_trait]
impl SecretManagers for SecretManager {
    async fn get_secret(&self, ctx: &OpContext, namespace: &str, name: &str) -> Result<Secret> {
        self.get(ctx, namespace, name).await
    }

    async fn create_secret(&self, ctx: &OpContext, secret: &Secret) -> Result<()> {
        self.create(ctx, secret).await
    }

    async fn update_secret(&self, ctx: &OpContext, secret: &Secret) -> Result<()> {
        self.update(ctx, secret).await
    }

    async fn delete_secret(&self, ctx: &OpContext, namespace: &str, name: &str) -> Result<()> {
        self.delete(ctx, namespace, name).await
    }
}
