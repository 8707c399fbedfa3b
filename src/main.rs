//! amz-product - Amazon product detail and review scraper CLI

use amz_product::amazon::regions::Region;
use amz_product::commands::{ScrapeCommand, Selection};
use amz_product::config::{Config, OutputFormat};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-product",
    version,
    about = "Amazon product detail and review scraper",
    long_about = "Scrapes title, price, rating, description, and reviews from an Amazon \
    product URL, tolerating markup drift via ordered fallback selectors."
)]
struct Cli {
    /// Amazon product URL (any marketplace, /dp/, /gp/product/, or amzn short link)
    url: String,

    /// Output only the product details
    #[arg(long)]
    details: bool,

    /// Output only the product reviews
    #[arg(long)]
    reviews: bool,

    /// Number of reviews to fetch
    #[arg(short = 'n', long, default_value = "10")]
    count: usize,

    /// Sort reviews by: helpful, recent, or rating
    #[arg(short, long, default_value = "helpful")]
    sort: String,

    /// Override the marketplace region (e.g. de, amazon.co.uk)
    #[arg(short, long, env = "AMZ_REGION")]
    region: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Delay between review-page fetches in milliseconds
    #[arg(long, default_value = "2000", env = "AMZ_DELAY")]
    delay: u64,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
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
    config.delay_ms = cli.delay;
    config.review_count = cli.count;
    config.sort = cli.sort;

    if let Some(region) = cli.region {
        config.region = Some(region);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let selection = Selection::from_flags(cli.details, cli.reviews);

    let cmd = ScrapeCommand::new(config);
    let output = cmd.execute(&cli.url, selection).await?;
    println!("{}", output);

    Ok(())
}
