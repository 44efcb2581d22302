//! Delete command - remove a Secret

use console::style;
use secretctl_kube::{OpContext, SecretManagers};

use super::Session;
use crate::error::Result;

/// Run the delete command
pub async fn run(session: &Session, name: &str, namespace: Option<&str>) -> Result<()> {
    let namespace = session.namespace(namespace);
    let secrets = session.connect().await?;

    execute(&secrets, &session.op_context(), &namespace, name).await?;

    println!(
        "{} Deleted secret {}",
        style("✓").green().bold(),
        style(format!("{namespace}/{name}")).cyan()
    );
    Ok(())
}

async fn execute(
    secrets: &dyn SecretManagers,
    ctx: &OpContext,
    namespace: &str,
    name: &str,
) -> Result<()> {
    secrets.delete_secret(ctx, namespace, name).await?;
    Ok(())
}
