mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quickshop")]
#[command(about = "Quick-view and add-to-cart client for a storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open a product in the quick view and print what the popup shows
    Show {
        /// Product handle or numeric id
        product: String,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Select options and add the resolved variant to the cart
    Add {
        /// Product handle or numeric id
        product: String,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Quantity to add, clamped to 1..=10
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the current cart
    Cart {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args)]
struct SelectionArgs {
    #[arg(long)]
    option1: Option<String>,
    #[arg(long)]
    option2: Option<String>,
    #[arg(long)]
    option3: Option<String>,
}

#[derive(Debug, Default, Args)]
struct SourceArgs {
    /// Saved product page whose embedded product JSON is used before fetching
    #[arg(long)]
    page: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("quickshop: run with --help to list commands");
        return Ok(());
    };

    let config = quickshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, store_url = %config.store_url, "config loaded");
    tracing::info!("{}", commands::promotion_summary(&config));

    match command {
        Commands::Show {
            product,
            selection,
            source,
        } => commands::run_show(&config, &product, &selection, &source).await,
        Commands::Add {
            product,
            selection,
            quantity,
            source,
        } => commands::run_add(&config, &product, &selection, quantity, &source).await,
        Commands::Cart { json } => commands::run_cart(&config, json).await,
    }
}
