//! Update command - replace a Secret with the contents of a manifest

use std::path::Path;

use console::style;
use k8s_openapi::api::core::v1::Secret;
use secretctl_kube::{OpContext, SecretManagers};

use super::{Session, display_key, load_manifest};
use crate::error::Result;

/// Run the update command
pub async fn run(session: &Session, file: &Path, namespace: Option<&str>) -> Result<()> {
    let fallback = session.namespace(namespace);
    let secret = load_manifest(file, namespace, &fallback)?;

    let secrets = session.connect().await?;
    execute(&secrets, &session.op_context(), &secret).await?;

    println!(
        "{} Updated secret {}",
        style("✓").green().bold(),
        style(display_key(&secret)).cyan()
    );
    if secret.metadata.resource_version.is_none() {
        println!("  No resourceVersion in manifest; replaced unconditionally");
    }
    Ok(())
}

async fn execute(secrets: &dyn SecretManagers, ctx: &OpContext, secret: &Secret) -> Result<()> {
    secrets.update_secret(ctx, secret).await?;
    Ok(())
}
