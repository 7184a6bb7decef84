pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub use client::{CakeClient, ClientError, MessageResponse};

#[derive(Parser)]
#[command(name = "cake")]
#[command(about = "Cake CLI - Command-line client for the Cake API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CAKE_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the Cake API server"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Cake(commands::cakes::CakeCommands),

    #[command(about = "Check server health status from API /health endpoint")]
    Health,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = CakeClient::new(&cli.server)?;

    match cli.command {
        Commands::Cake(cmd) => commands::cakes::handle(cmd, &client, output_format).await,
        Commands::Health => commands::server::health(&client, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_update_flags() {
        let cli = Cli::try_parse_from([
            "cake", "--server", "http://cakes:8080", "update", "3", "--yum-factor", "10",
        ])
        .unwrap();

        assert_eq!(cli.server, "http://cakes:8080");
        match cli.command {
            Commands::Cake(commands::cakes::CakeCommands::Update { id, fields }) => {
                assert_eq!(id, 3);
                assert_eq!(fields.yum_factor, Some(10));
                assert_eq!(fields.name, None);
            }
            _ => panic!("expected update command"),
        }
    }
}
