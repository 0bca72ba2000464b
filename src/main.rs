//! Gleaner main entry point
//!
//! Command-line interface for the gleaner extraction-and-crawl engine.

use clap::Parser;
use gleaner::config::{load_config, Config, FieldSpec};
use gleaner::crawler::{crawl, Orchestrator};
use gleaner::output::{write_csv, Table};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Gleaner: a declarative listing extractor
///
/// Gleaner walks a paginated search-result site, extracts the fields a TOML
/// configuration declares via structural paths, follows detail links, and
/// writes the assembled records to a CSV file. Fetched pages are cached on
/// disk so re-runs within the cache window are free.
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version)]
#[command(about = "A declarative listing extractor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured location code
    #[arg(long)]
    location: Option<String>,

    /// Do not write fetched pages to the cache (existing entries are still used)
    #[arg(long)]
    no_persist: bool,

    /// Validate config, compile the schema, and show what would be crawled
    /// without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(location) = cli.location {
        config.crawl.location = location;
    }
    if cli.no_persist {
        config.cache.persist = false;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gleaner=info,warn"),
            1 => EnvFilter::new("gleaner=debug,info"),
            2 => EnvFilter::new("gleaner=trace,debug"),
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

/// Handles the --dry-run mode: compiles the schema and shows the plan.
/// Compiling exercises the same checks a real run would, so column
/// collisions and bad paths are reported here.
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    drop(orchestrator);

    println!("=== Gleaner Dry Run ===\n");

    println!("Crawl:");
    println!("  URL template: {}", config.crawl.url_template);
    println!("  Location: {}", config.crawl.location);
    println!("  Detail failure: {:?}", config.crawl.detail_failure);

    println!("\nEntity: {}", config.entity.name);
    for field in &config.entity.fields {
        print_field(field, 1);
    }

    match &config.paginator {
        Some(p) => println!(
            "\nPagination: up to {} additional pages",
            p.max_follow_count
        ),
        None => println!("\nPagination: first page only"),
    }

    println!("\nCache:");
    println!("  Root: {}", config.cache.root_dir);
    println!("  Policy: {:?}", config.cache.policy);
    println!("  Persist: {}", config.cache.persist);

    println!("\nOutput: {}", config.output.csv_path);
    println!("\n✓ Configuration is valid");

    Ok(())
}

fn print_field(field: &FieldSpec, depth: usize) {
    let indent = "  ".repeat(depth);
    let suffix = if field.required { " (required)" } else { "" };
    println!("{}- {}{}", indent, field.name, suffix);
    if let Some(follow) = &field.follow {
        println!("{}  follows link, merge = {:?}", indent, follow.merge);
        for child in &follow.fields {
            print_field(child, depth + 2);
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let table = Table::from_records(&report.records);
    let csv_path = Path::new(&config.output.csv_path);
    write_csv(&table, csv_path, &config.output.missing_value)?;

    println!(
        "{}: captured {} records across {} page(s)",
        report.entity,
        table.len(),
        report.pages_visited
    );
    println!("CSV written to: {}", csv_path.display());
    if let Some(cache_dir) = &report.cache_dir {
        println!("Documents cached under: {}", cache_dir.display());
    }

    Ok(())
}
