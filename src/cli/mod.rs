pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "game-api")]
#[command(about = "Game API server and development tooling")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT / GAME_API_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
        host: Option<String>,
    },

    #[command(about = "Print a development bearer token for a user")]
    Token {
        #[arg(help = "Username to embed in the token")]
        username: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    let config = crate::config::config();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::handle(config, port, host).await,
        Commands::Token { username } => commands::token::handle(config, &username, output_format),
    }
}
