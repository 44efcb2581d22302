//! secretctl - read and write Kubernetes Secrets

use clap::{Parser, Subcommand};
use secretctl_kube::{ClientConfig, LogFormat};
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod display;
mod error;
mod exit_codes;
mod logging;

use commands::Session;
use commands::create::Source;
use display::OutputFormat;
use error::{CliError, Result};

#[derive(Parser)]
#[command(name = "secretctl")]
#[command(author = "secretctl Contributors")]
#[command(version)]
#[command(about = "Read and write Kubernetes Secrets", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: $XDG_CONFIG_HOME/secretctl/config.yaml)
    #[arg(long, global = true, env = "SECRETCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,

    /// Give up on the request after this long (e.g. 10s, 1m)
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Log output format
    #[arg(long, global = true, value_parser = clap::value_parser!(LogFormat))]
    log_format: Option<LogFormat>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a Secret
    Get {
        /// Secret name
        name: String,

        /// Namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// Print data values instead of their sizes
        #[arg(long)]
        decode: bool,
    },

    /// Create a Secret from a manifest or literal values
    Create {
        /// Secret name (with --from-literal)
        #[arg(conflicts_with = "filename")]
        name: Option<String>,

        /// Manifest file
        #[arg(short = 'f', long)]
        filename: Option<PathBuf>,

        /// Data entry as KEY=VALUE (repeatable)
        #[arg(long = "from-literal", conflicts_with = "filename")]
        from_literal: Vec<String>,

        /// Secret type
        #[arg(long = "type", conflicts_with = "filename")]
        type_: Option<String>,

        /// Namespace
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Replace a Secret with the contents of a manifest
    Update {
        /// Manifest file
        #[arg(short = 'f', long)]
        filename: PathBuf,

        /// Namespace
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Delete a Secret
    Delete {
        /// Secret name
        name: String,

        /// Namespace
        #[arg(short, long)]
        namespace: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    if cli.context.is_some() {
        config.context = cli.context.clone();
    }

    logging::init(cli.log_format.unwrap_or(config.log_format), cli.debug);

    let session = Session::new(config, cli.timeout);

    match cli.command {
        Commands::Get {
            name,
            namespace,
            output,
            decode,
        } => commands::get::run(&session, &name, namespace.as_deref(), output, decode).await,

        Commands::Create {
            name,
            filename,
            from_literal,
            type_,
            namespace,
        } => {
            let source = match (filename, name) {
                (Some(path), _) => Source::Manifest(path),
                (None, Some(name)) => Source::Literals {
                    name,
                    literals: from_literal,
                    type_,
                },
                (None, None) => {
                    return Err(CliError::usage_with_help(
                        "nothing to create",
                        "pass -f <manifest> or a name with --from-literal KEY=VALUE",
                    ));
                }
            };
            commands::create::run(&session, &source, namespace.as_deref()).await
        }

        Commands::Update {
            filename,
            namespace,
        } => commands::update::run(&session, &filename, namespace.as_deref()).await,

        Commands::Delete { name, namespace } => {
            commands::delete::run(&session, &name, namespace.as_deref()).await
        }
    }
}
