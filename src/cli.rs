use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::serve;

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Stock forecast dashboard web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Base URL of the market data endpoint
        ///
        /// Points at Yahoo Finance by default; override it to route the
        /// dashboard at a mirror or a local stub.
        #[arg(short, long, env = "PROVIDER_BASE_URL", default_value = provider::DEFAULT_BASE_URL)]
        provider_url: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                provider_url,
            } => {
                serve(&provider_url, &bind_address).await?;
            }
        }
        Ok(())
    }
}
