//! Get command - show a Secret

use secretctl_kube::{OpContext, SecretManagers};

use super::Session;
use crate::display::{self, OutputFormat};
use crate::error::Result;

/// Run the get command
pub async fn run(
    session: &Session,
    name: &str,
    namespace: Option<&str>,
    output: OutputFormat,
    decode: bool,
) -> Result<()> {
    let namespace = session.namespace(namespace);
    let secrets = session.connect().await?;

    let rendered = execute(&secrets, &session.op_context(), &namespace, name, output, decode).await?;
    println!("{}", rendered);
    Ok(())
}

async fn execute(
    secrets: &dyn SecretManagers,
    ctx: &OpContext,
    namespace: &str,
    name: &str,
    output: OutputFormat,
    decode: bool,
) -> Result<String> {
    let secret = secrets.get_secret(ctx, namespace, name).await?;
    display::render(&secret, output, decode)
}
