//! rsrank CLI binary.
//!
//! Ranks stocks and industries by relative strength against a benchmark.

mod integration;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use integration::cache_manager;
use integration::data_pipeline::{FetchConfig, YahooSource, print_cache_info};
use rsrank::universe::Universe;
use rsrank::{RankingConfig, RankingEngine, StockIndex, index_name};
use rsrank_data::MetadataLookup;
use rsrank_output::{ExportFormat, Exporter, ReportBuilder, TableKind, export_file_name};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "rsrank")]
#[command(about = "Relative strength ratings and industry rankings", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank stocks and their industries
    Rank {
        /// Tickers to rank, added to the index constituents
        tickers: Vec<String>,

        /// Rank the constituents of an index (e.g. SPX, ^NDX, DJIA, SOX)
        #[arg(long)]
        index: Option<String>,

        /// Benchmark symbol
        #[arg(long, default_value = "^GSPC")]
        reference: String,

        /// Look-back period (e.g. 6mo, 2y, ytd, max)
        #[arg(long, default_value = "2y")]
        period: String,

        /// Sampling interval (1d, 1wk, 1mo)
        #[arg(long, default_value = "1d")]
        interval: String,

        /// Rating method (rank or qcut)
        #[arg(long, default_value = "rank")]
        method: String,

        /// Strength window (3mo or 12mo)
        #[arg(long, default_value = "12mo")]
        window: String,

        /// Minimum current percentile of listed stocks
        #[arg(long, default_value_t = 80)]
        min_percentile: u8,

        /// Show at most this many rows per table
        #[arg(long)]
        limit: Option<usize>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write both tables to this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Format of the exported tables (csv, json, pretty-json)
        #[arg(long, default_value = "csv")]
        export_format: ExportFormat,

        /// CSV with symbol, sector and industry columns, used instead of fetched profiles
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Disable caching (always fetch fresh data)
        #[arg(long)]
        no_cache: bool,

        /// Force refresh cached data
        #[arg(long)]
        refresh: bool,

        /// Hide progress bars
        #[arg(long)]
        quiet: bool,
    },

    /// List index universes or the constituents of one index
    Universe {
        /// Index symbol or alias
        index: Option<String>,
    },

    /// Inspect or clear the local cache (location overridable with RSRANK_CACHE_DIR)
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show cache location and contents
    Stats,
    /// Remove cached data, for one symbol or everything
    Clear {
        /// Symbol to clear
        symbol: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fixed-width tables
    Text,
    /// Markdown tables
    Markdown,
    /// JSON document
    Json,
}

/// Options of the rank command, besides the ranking configuration.
struct RankOptions {
    min_percentile: u8,
    limit: Option<usize>,
    format: OutputFormat,
    out_dir: Option<PathBuf>,
    export_format: ExportFormat,
    metadata: Option<PathBuf>,
    fetch: FetchConfig,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_json);

    match cli.command {
        Commands::Rank {
            tickers,
            index,
            reference,
            period,
            interval,
            method,
            window,
            min_percentile,
            limit,
            format,
            out_dir,
            export_format,
            metadata,
            no_cache,
            refresh,
            quiet,
        } => {
            // Parse everything before touching the network
            let config = RankingConfig::from_strs(&reference, &period, &interval, &method, &window)?;
            let tickers = collect_tickers(index.as_deref(), tickers)?;
            let options = RankOptions {
                min_percentile,
                limit,
                format,
                out_dir,
                export_format,
                metadata,
                fetch: FetchConfig {
                    use_cache: !no_cache,
                    force_refresh: refresh,
                    show_progress: !quiet,
                },
            };
            rank(config, &tickers, options).await?;
        }
        Commands::Universe { index } => list_universe(index.as_deref())?,
        Commands::Cache { action } => manage_cache(action)?,
    }

    Ok(())
}

/// Index constituents followed by explicit tickers, upper-cased.
fn collect_tickers(
    index: Option<&str>,
    explicit: Vec<String>,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut tickers = match index {
        Some(index) => index.parse::<StockIndex>()?.symbols(),
        None => Vec::new(),
    };
    tickers.extend(explicit.into_iter().map(|t| t.trim().to_uppercase()));

    if tickers.is_empty() {
        return Err("no tickers given: pass tickers or --index".into());
    }
    Ok(tickers)
}

async fn rank(
    config: RankingConfig,
    tickers: &[String],
    options: RankOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = match &options.metadata {
        Some(path) => MetadataLookup::from_csv_reader(File::open(path)?)?,
        None => MetadataLookup::new(),
    };

    let cache = if options.fetch.use_cache {
        match cache_manager::open_cache() {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!(error = %e, "cache unavailable, fetching without it");
                None
            }
        }
    } else {
        info!("cache disabled");
        None
    };

    eprintln!(
        "Relative strength of {} tickers vs {} ({})",
        tickers.len(),
        config.reference,
        index_name(&config.reference)
    );
    if options.fetch.show_progress && options.format == OutputFormat::Text {
        print_cache_info(cache.as_ref());
    }

    let source = YahooSource::new(cache, overrides, options.fetch)?;
    let engine = RankingEngine::new(source, config);
    let rankings = engine.run(tickers).await?;

    if rankings.is_empty() {
        println!("Not enough data to generate rankings.");
        return Ok(());
    }

    let config = engine.config();
    let mut builder = ReportBuilder::new()
        .reference(config.reference.clone())
        .window(config.window)
        .method(config.method)
        .min_percentile(options.min_percentile)
        .securities(&rankings.securities)
        .industries(&rankings.industries);
    if let Some(as_of) = rankings.as_of {
        builder = builder.as_of(as_of);
    }
    if let Some(limit) = options.limit {
        builder = builder.limit(limit);
    }
    let report = builder.build()?;

    match options.format {
        OutputFormat::Text => println!("{}", report.to_ascii_table()),
        OutputFormat::Markdown => println!("{}", report.to_markdown()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(dir) = &options.out_dir {
        let as_of = rankings.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let name = |kind| {
            export_file_name(kind, config.window, config.method, as_of, options.export_format)
        };
        std::fs::create_dir_all(dir)?;

        let stocks = dir.join(name(TableKind::Stocks));
        report.securities.export_to_file(&stocks, options.export_format)?;
        let industries = dir.join(name(TableKind::Industries));
        report.industries.export_to_file(&industries, options.export_format)?;

        print_written(&stocks);
        print_written(&industries);
    }

    Ok(())
}

fn print_written(path: &Path) {
    eprintln!("Wrote {}", path.display());
}

fn list_universe(index: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match index {
        Some(index) => {
            let index: StockIndex = index.parse()?;
            println!("{} ({}, {})", index.name(), index.symbol(), index.alias());
            println!("Constituents: {}\n", index.size());
            for ticker in index.tickers() {
                println!("  {ticker}");
            }
        }
        None => {
            println!("Index Universes");
            println!("===============\n");
            for index in StockIndex::ALL {
                println!(
                    "  {:<6} {:<5} {:<32} {:>4} tickers",
                    index.symbol(),
                    index.alias(),
                    index.name(),
                    index.size()
                );
            }
        }
    }
    Ok(())
}

fn manage_cache(action: CacheAction) -> Result<(), Box<dyn std::error::Error>> {
    let cache = cache_manager::open_cache()?;
    match action {
        CacheAction::Stats => {
            println!("Cache");
            print_cache_info(Some(&cache));
        }
        CacheAction::Clear { symbol: Some(symbol) } => {
            cache.clear_symbol(&symbol)?;
            println!("Cleared cached data for {symbol}");
        }
        CacheAction::Clear { symbol: None } => {
            cache.clear_all()?;
            println!("Cleared all cached data");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_tickers_from_index_and_args() {
        let tickers = collect_tickers(Some("DJIA"), vec![" tsm ".to_string()]).unwrap();
        assert_eq!(tickers.len(), 31);
        assert_eq!(tickers.last().map(String::as_str), Some("TSM"));
    }

    #[test]
    fn test_collect_tickers_requires_input() {
        assert!(collect_tickers(None, Vec::new()).is_err());
        assert!(collect_tickers(Some("^HSI"), Vec::new()).is_err());
    }

    #[test]
    fn test_cli_parses_rank_defaults() {
        let cli = Cli::try_parse_from(["rsrank", "rank", "NVDA", "AMD"]).unwrap();
        match cli.command {
            Commands::Rank {
                tickers,
                reference,
                min_percentile,
                export_format,
                ..
            } => {
                assert_eq!(tickers, vec!["NVDA", "AMD"]);
                assert_eq!(reference, "^GSPC");
                assert_eq!(min_percentile, 80);
                assert_eq!(export_format, ExportFormat::Csv);
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_cache_path_under_rsrank_dir() {
        let path = cache_manager::cache_path();
        assert!(path.ends_with("rsrank.db"));
    }
}
