mod api;
mod cli;
mod config;
mod models;
mod services;
mod store;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "hoopdesk")]
#[command(about = "A natural-language question desk for basketball season stats")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Answer one question from the terminal
    Ask {
        question: String,
        /// Print the structured answer as JSON instead of the text template
        #[arg(long)]
        json: bool,
    },
    /// List the player names in the loaded dataset
    Players,
    /// Show a top-N ranking for a stat
    Top {
        /// Stat label (득점, 리바운드, ... or PTS/TRB/AST/STL/BLK/FG%/3P%)
        #[arg(short, long)]
        stat: String,
        #[arg(long)]
        season: Option<String>,
        #[arg(short, long, default_value = "5")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Some(Commands::Serve { port }) => {
            tracing::info!("Starting hoopdesk server on port {}", port);
            api::serve(config, port).await?;
        }
        Some(Commands::Ask { question, json }) => {
            cli::ask(&config, &question, json)?;
        }
        Some(Commands::Players) => {
            cli::list_players(&config)?;
        }
        Some(Commands::Top { stat, season, count }) => {
            cli::show_ranking(&config, &stat, season.as_deref(), count)?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting hoopdesk server on port 3000");
            api::serve(config, 3000).await?;
        }
    }

    Ok(())
}
