//! Create command - create a Secret from a manifest or literal values

use std::collections::BTreeMap;
use std::path::PathBuf;

use console::style;
use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use secretctl_kube::{OpContext, SecretManagers};

use super::{Session, display_key, load_manifest};
use crate::error::{CliError, Result};

/// Where the new Secret comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// YAML or JSON manifest on disk
    Manifest(PathBuf),
    /// Name plus `KEY=VALUE` pairs
    Literals {
        name: String,
        literals: Vec<String>,
        type_: Option<String>,
    },
}

/// Run the create command
pub async fn run(session: &Session, source: &Source, namespace: Option<&str>) -> Result<()> {
    let fallback = session.namespace(namespace);
    let secret = build_secret(source, namespace, &fallback)?;

    let secrets = session.connect().await?;
    execute(&secrets, &session.op_context(), &secret).await?;

    println!(
        "{} Created secret {}",
        style("✓").green().bold(),
        style(display_key(&secret)).cyan()
    );
    Ok(())
}

async fn execute(secrets: &dyn SecretManagers, ctx: &OpContext, secret: &Secret) -> Result<()> {
    secrets.create_secret(ctx, secret).await?;
    Ok(())
}

/// Build the Secret to create without touching the cluster
pub fn build_secret(source: &Source, explicit: Option<&str>, fallback: &str) -> Result<Secret> {
    match source {
        Source::Manifest(path) => load_manifest(path, explicit, fallback),
        Source::Literals {
            name,
            literals,
            type_,
        } => {
            let data = parse_literals(literals)?
                .into_iter()
                .map(|(k, v)| (k, ByteString(v.into_bytes())))
                .collect();
            Ok(Secret {
                metadata: ObjectMeta {
                    name: Some(name.clone()),
                    namespace: Some(fallback.to_string()),
                    ..Default::default()
                },
                type_: Some(type_.clone().unwrap_or_else(|| "Opaque".to_string())),
                data: Some(data),
                ..Default::default()
            })
        }
    }
}

/// Parse `KEY=VALUE` pairs; values may contain `=`
pub fn parse_literals(literals: &[String]) -> Result<BTreeMap<String, String>> {
    let mut data = BTreeMap::new();
    for literal in literals {
        let Some((key, value)) = literal.split_once('=') else {
            return Err(CliError::usage_with_help(
                format!("invalid literal '{literal}'"),
                "use --from-literal KEY=VALUE",
            ));
        };
        if key.is_empty() {
            return Err(CliError::usage(format!("empty key in literal '{literal}'")));
        }
        if data.insert(key.to_string(), value.to_string()).is_some() {
            return Err(CliError::usage(format!("duplicate key '{key}'")));
        }
    }
    Ok(data)
}
