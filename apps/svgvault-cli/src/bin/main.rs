use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::Path;
use tracing::debug;

use svgvault_core::config::{resolve_with_base, Config, Settings};
use svgvault_core::logging::init_logging;
use svgvault_core::{SearchFilters, VaultIndex};
use svgvault_index::handler::{checked_root, INVALID_ROOT};
use svgvault_index::{IndexOptions, IndexRequest, SearchRequest, VaultHandler, VaultIndexer};

#[derive(Parser)]
#[command(name = "svgvault")]
#[command(about = "Index SVG asset folders and search them by structure and color", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the JSON response envelope instead of a summary
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the sidecar index of a vault root
    Index {
        /// Vault root directory
        root: String,
        /// Build the index without writing the sidecar
        #[arg(long)]
        dry_run: bool,
    },
    /// Query the sidecar index of a vault root
    Search {
        /// Vault root directory
        root: String,
        /// Substring matched against names, tags and colors
        query: Option<String>,
        /// Minimum number of <path> elements (inclusive)
        #[arg(long)]
        min_paths: Option<usize>,
        /// Maximum number of <path> elements (inclusive)
        #[arg(long)]
        max_paths: Option<usize>,
        /// Require this fill color
        #[arg(long)]
        fill: Option<String>,
        /// Require this stroke color
        #[arg(long)]
        stroke: Option<String>,
        /// Rows to print (defaults to search.display_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    init_logging(settings.log.json);

    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    match cli.command {
        Commands::Index { root, dry_run } => {
            run_index(&settings, &resolve_with_base(&cwd, root), dry_run, cli.json)
        }
        Commands::Search { root, query, min_paths, max_paths, fill, stroke, limit } => {
            let filters = SearchFilters { min_paths, max_paths, fill, stroke };
            let limit = limit.unwrap_or(settings.search.display_limit);
            run_search(&settings, &resolve_with_base(&cwd, root), query, filters, limit, cli.json)
        }
    }
}

fn run_index(settings: &Settings, root: &Path, dry_run: bool, json: bool) -> Result<()> {
    let options = IndexOptions { persist: !dry_run, ..IndexOptions::from(&settings.vault) };
    let indexer = VaultIndexer::with_options(options)?;
    let root_dir = root.to_string_lossy().into_owned();
    debug!(root = %root_dir, dry_run, "Index command");

    if json {
        let response = VaultHandler::new(indexer).handle_index(&IndexRequest { root_dir });
        println!("{}", serde_json::to_string_pretty(&response)?);
        if !response.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    if checked_root(&root_dir).is_none() {
        eprintln!("{}: {}", INVALID_ROOT, root.display());
        std::process::exit(1);
    }
    let (index, stats) = indexer.index_with_stats(root)?;

    println!("Vault index\n===========");
    println!("Root      : {}", index.root_dir);
    println!("Strategy  : {}", indexer.extractor_name());
    println!(
        "Items     : {} ({} unreadable files, {} unreadable directories)",
        index.count, stats.files_skipped, stats.dirs_skipped
    );
    if dry_run {
        println!("Sidecar   : not written (dry run)");
    } else {
        println!("Sidecar   : {}", root.join(&indexer.options().sidecar_name).display());
    }
    print_colors(&index, settings.search.display_limit);
    Ok(())
}

fn run_search(
    settings: &Settings,
    root: &Path,
    query: Option<String>,
    filters: SearchFilters,
    limit: usize,
    json: bool,
) -> Result<()> {
    let handler = VaultHandler::new(VaultIndexer::with_options(IndexOptions::from(&settings.vault))?);
    let request = SearchRequest {
        root_dir: root.to_string_lossy().into_owned(),
        query,
        filters: Some(filters),
    };
    let response = handler.handle_search(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        if !response.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    let Some(results) = response.results else {
        eprintln!("{}: {}", response.error.as_deref().unwrap_or(INVALID_ROOT), root.display());
        std::process::exit(1);
    };
    if results.created_at == 0 {
        println!("No index for {}. Run `svgvault index` first.", root.display());
    }
    println!("Results: {}", results.count);
    for item in results.items.iter().take(limit) {
        println!("  {:<40} {:>5} paths  {}", item.name, item.path_count, item.id);
    }
    if results.count > limit {
        println!("  ... {} more", results.count - limit);
    }
    Ok(())
}

fn print_colors(index: &VaultIndex, limit: usize) {
    if index.colors.is_empty() {
        return;
    }
    println!("Top colors:");
    for c in index.colors.iter().take(limit) {
        println!("  {:<24} {}", c.color, c.count);
    }
}
