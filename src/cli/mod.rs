pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prensa")]
#[command(about = "Scrape opinion articles, translate headlines, tally repeated words", long_about = None)]
pub struct Cli {
    /// Number of parallel workers for remote sessions (overrides the config file)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one session against a local headless Chrome
    Local {
        /// Show the browser window
        #[arg(long)]
        headed: bool,
    },
    /// Run the configured remote sessions in parallel
    Fleet,
    /// Run the local session, then the fleet
    Run {
        /// Show the local browser window
        #[arg(long)]
        headed: bool,
    },
}
