//! maeto-crawler - Product scraper CLI for Loja Maeto

use anyhow::Result;
use clap::{Parser, Subcommand};
use maeto_crawler::commands::{ScrapeCommand, ShowCommand};
use maeto_crawler::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "maeto-crawler",
    version,
    about = "Product scraper CLI for Loja Maeto",
    long_about = "Crawls Loja Maeto search results, extracts product listings and \
                  specification tables, and optionally persists them to SQLite."
)]
struct Cli {
    /// Base origin of the store
    #[arg(long, global = true, env = "MAETO_BASE_URL")]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "MAETO_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MAETO_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape products for a search query
    #[command(alias = "s")]
    Scrape {
        /// Search query
        query: String,

        /// Maximum number of products to collect (0 = no limit)
        #[arg(short, long, default_value = "0")]
        max: usize,

        /// SQLite database to upsert products into
        #[arg(short, long, env = "MAETO_DATABASE")]
        database: Option<PathBuf>,
    },

    /// Show a previously scraped product by SKU
    Show {
        /// Product SKU
        sku: String,

        /// SQLite database to read from
        #[arg(short, long, env = "MAETO_DATABASE")]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    match cli.command {
        Commands::Scrape { query, max, database } => {
            config.max_products = max;
            if let Some(database) = database {
                config.database = Some(database);
            }

            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Show { sku, database } => {
            if let Some(database) = database {
                config.database = Some(database);
            }

            let cmd = ShowCommand::new(config);
            let output = cmd.execute(&sku).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
