//! secretctl Kube - typed access to Kubernetes Secrets
//!
//! This crate provides:
//! - **Resource Manager**: get/create/update/delete for one namespaced kind, with
//!   an audit record after every successful write
//! - **Object Client**: the cluster verbs the manager consumes, backed by `kube::Api`
//! - **Test Doubles**: an in-memory client and a recording logger
//! - **Deadlines**: per-call `OpContext` threaded through every operation
//! - **Manifests & Config**: Secret manifest parsing and client configuration
//!
//! ```no_run
//! use secretctl_kube::{OpContext, SecretManager};
//!
//! # async fn run() -> secretctl_kube::Result<()> {
//! let client = kube::Client::try_default().await?;
//! let secrets = SecretManager::for_cluster(client);
//! let secret = secrets.get(&OpContext::background(), "default", "db-credentials").await?;
//! # let _ = secret;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod logger;
pub mod manager;
pub mod manifest;
pub mod mock;

pub use client::{KubeObjectClient, ObjectClient};
pub use config::{ClientConfig, DEFAULT_NAMESPACE, LogFormat};
pub use context::OpContext;
pub use error::{Result, SecretError};
pub use identity::ObjectKey;
pub use logger::{Logger, TracingLogger};
pub use manager::{ResourceManager, SecretManager, SecretManagers};
pub use manifest::{default_namespace, parse_manifest};
pub use mock::{InMemoryObjectClient, LogRecord, OperationCounts, RecordingLogger};
