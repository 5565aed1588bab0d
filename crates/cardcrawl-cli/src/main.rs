mod crawl;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cardcrawl")]
#[command(about = "Crawl a paginated card catalog into a single CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl every navigation facet, then aggregate the batches into CSV
    Crawl {
        /// Reuse the cached navigation file, writing it first if absent
        #[arg(long)]
        nav_cache: bool,

        /// Keep the batch files without deduplicating them into a CSV
        #[arg(long)]
        no_aggregate: bool,
    },
    /// Rebuild the CSV from an existing batch directory
    Aggregate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = cardcrawl_core::load_crawl_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Crawl {
            nav_cache,
            no_aggregate,
        }) => {
            config.use_nav_cache |= nav_cache;
            if no_aggregate {
                config.aggregate = false;
            }
            crawl::run_crawl_command(&config).await
        }
        Some(Commands::Aggregate) => crawl::write_csv(&config).await.map(|_| ()),
        None => crawl::run_crawl_command(&config).await,
    }
}
