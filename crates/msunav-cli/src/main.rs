mod lookup;
mod render;

use clap::{Parser, Subcommand};
use msunav_client::Interaction;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "msunav")]
#[command(about = "Look up MapleStory Universe items and enhancement prices")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search items by name
    Search {
        /// Free-text keyword, e.g. "Red Cape"
        keyword: String,
    },
    /// Show item details and enhancement pricing
    Item {
        /// Item ID from a search result
        item_id: String,
        /// Skip the starforce and potential pricing tables
        #[arg(long)]
        no_pricing: bool,
    },
    /// Show the last search if it is less than five minutes old
    Recent,
    /// Answer a JSON host request, e.g. '{"action":"getItemMetadata","itemId":1102000}'
    Dispatch {
        /// Request body
        request: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = msunav_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Search { keyword }) => {
            let client = lookup::build_client(&config)?;
            let mut interaction = Interaction::new();
            lookup::run_search(&client, &config, &mut interaction, &keyword).await?;
        }
        Some(Commands::Item {
            item_id,
            no_pricing,
        }) => {
            let client = lookup::build_client(&config)?;
            lookup::run_item(&client, &item_id, !no_pricing).await?;
        }
        Some(Commands::Recent) => lookup::run_recent(&config)?,
        Some(Commands::Dispatch { request }) => {
            let client = lookup::build_client(&config)?;
            lookup::run_dispatch(&client, &request).await?;
        }
        None => println!("msunav: run with --help to see available commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
