//! Inspect the deploy configuration of a project.
//!
//! - `networks`: list configured networks
//! - `provider <name>`: build the provider for a network, optionally checking its id
//! - `compilers`: print the compiler selection as JSON

use clap::{Parser, Subcommand};
use config::{ProjectConfig, DEFAULT_NETWORK};
use deploy_config::{network_rows, resolve_provider};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "deploy-config")]
#[command(about = "Inspect networks and compilers of a deploy project")]
struct Cli {
    /// Project root holding local.jsonc and .private-keys
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured networks
    Networks,

    /// Build the provider for a network and show its accounts
    Provider {
        /// Network name
        #[arg(default_value = DEFAULT_NETWORK)]
        name: String,

        /// Ask the node for its network id and compare it with the configuration
        #[arg(long)]
        check: bool,
    },

    /// Print the compiler selection
    Compilers,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ProjectConfig::load(&cli.root)?;

    info!("Loaded configuration from {}", cli.root.display());

    match cli.command {
        Command::Networks => {
            for row in network_rows(&config) {
                info!(
                    "  {:<16} {:<8} id={:<5} {}",
                    row.name, row.kind, row.network_id, row.endpoint
                );
            }
        }
        Command::Provider { name, check } => {
            let summary = resolve_provider(&config, &name, check).await?;

            info!("Network: {}", summary.network);
            info!("  Endpoint: {}", summary.url);
            if summary.accounts.is_empty() {
                info!("  Accounts: managed by the node");
            }
            for (index, account) in summary.accounts.iter().enumerate() {
                info!("  Account #{}: {}", index, account);
            }
        }
        Command::Compilers => {
            println!("{}", serde_json::to_string_pretty(&config.compilers)?);
        }
    }

    Ok(())
}
