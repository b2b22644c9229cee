use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prensa::app::AppContext;
use prensa::cli::{commands, Cli, Commands};
use prensa::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Local { headed } => {
            commands::run_local(&ctx, headed).await?;
        }
        Commands::Fleet => {
            commands::run_fleet(&ctx, cli.workers).await?;
        }
        Commands::Run { headed } => {
            commands::run_all(&ctx, headed, cli.workers).await?;
        }
    }

    Ok(())
}
