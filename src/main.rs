//! Fathom main entry point
//!
//! Thin CLI over the crawler core: parse arguments, wire up logging and the
//! HTTP downloader, run one crawl, print the report.

use clap::Parser;
use fathom::config::{load_config, CrawlConfig, DEFAULT_DEPTH};
use fathom::crawler::{Crawler, HttpDownloader};
use fathom::output::{print_report, CrawlReport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USER_AGENT: &str = concat!("fathom/", env!("CARGO_PKG_VERSION"));

/// Fathom: a depth-bounded concurrent web crawler
///
/// Downloads pages starting from URL and follows their links up to DEPTH
/// hops, bounding concurrency per origin host and across the download and
/// extraction pools.
#[derive(Parser, Debug)]
#[command(name = "fathom")]
#[command(version)]
#[command(about = "A depth-bounded concurrent web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Size of the download worker pool
    #[arg(value_name = "DOWNLOADERS")]
    downloaders: Option<usize>,

    /// Size of the link-extraction worker pool
    #[arg(value_name = "EXTRACTORS")]
    extractors: Option<usize>,

    /// Maximum concurrent downloads per origin host
    #[arg(value_name = "PER_HOST")]
    per_host: Option<usize>,

    /// Crawl depth, inclusive of the seed page
    #[arg(value_name = "DEPTH")]
    depth: Option<usize>,

    /// Path to a TOML configuration file; CLI arguments take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Start from the config file (or defaults), then let positional
    // arguments override.
    let base = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => CrawlConfig::default(),
    };

    let config = CrawlConfig {
        downloaders: cli.downloaders.unwrap_or(base.downloaders),
        extractors: cli.extractors.unwrap_or(base.extractors),
        per_host: cli.per_host.unwrap_or(base.per_host),
    };
    fathom::config::validate(&config)?;

    let depth = cli.depth.unwrap_or(DEFAULT_DEPTH).max(1);

    tracing::info!(
        "Crawling {} (depth {}, {} downloaders, {} extractors, {} per host)",
        cli.url,
        depth,
        config.downloaders,
        config.extractors,
        config.per_host
    );

    let downloader = Arc::new(HttpDownloader::new(USER_AGENT)?);
    let crawler = Crawler::new(downloader, config);

    let result = crawler.download(&cli.url, depth).await;
    print_report(&CrawlReport::from_result(&result));

    crawler.close();
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fathom=info,warn"),
            1 => EnvFilter::new("fathom=debug,info"),
            2 => EnvFilter::new("fathom=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
