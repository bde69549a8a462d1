use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::components::{
    CategoryComponent, ListingQuery, Listings, MinQuantityComponent, PriceDescendingComponent,
};
use pipeline::{ComponentSpec, Filter, FilterConfig};
use relation::{parser, Listing, MemoryRelation, Queryable, RecordId};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// filter-trace - run a listing filter and show what every step removed
#[derive(Parser)]
#[command(name = "filter-trace")]
#[command(about = "Step-by-step inspection of listing filters", long_about = None)]
struct Cli {
    /// Path to a listings file (id::category::price::quantity)
    #[arg(short, long, default_value = "data/listings.dat")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a filter and print its step trace
    Trace {
        /// Keep only listings of this category
        #[arg(long)]
        category: Option<String>,

        /// Keep only listings with more units than this
        #[arg(long)]
        min_quantity: Option<i64>,

        /// Order the remaining listings by price, highest first
        #[arg(long)]
        order_by_price: bool,

        /// Show only this step (0-based)
        #[arg(long)]
        step: Option<usize>,

        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every loaded listing
    List,
}

/// One recorded step, flattened for output
#[derive(Debug, Serialize)]
struct StepReport {
    index: usize,
    component: String,
    results: Vec<Listing>,
    removed: Vec<RecordId>,
}

/// The whole trace of one filter run
#[derive(Debug, Serialize)]
struct TraceReport {
    steps: Vec<StepReport>,
    results: Vec<Listing>,
    removed: Vec<RecordId>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let table = parser::load_listing_table(&cli.data_file)
        .with_context(|| format!("Failed to load listings from {}", cli.data_file.display()))?;
    tracing::debug!("Loaded table in {:?}", start.elapsed());

    let all = MemoryRelation::all(Arc::new(table));

    match cli.command {
        Commands::Trace {
            category,
            min_quantity,
            order_by_price,
            step,
            json,
        } => {
            let query = ListingQuery {
                category,
                min_quantity,
            };
            handle_trace(all, query, order_by_price, step, json)?
        }
        Commands::List => handle_list(&all),
    }

    Ok(())
}

/// Components enabled by the given query, in a fixed order:
/// category, then quantity, then price ordering.
fn build_config(
    all: Listings,
    query: &ListingQuery,
    order_by_price: bool,
) -> Result<Arc<FilterConfig<Listings, ListingQuery>>> {
    let mut specs = Vec::new();
    if query.category.is_some() {
        specs.push(ComponentSpec::of::<CategoryComponent>());
    }
    if query.min_quantity.is_some() {
        specs.push(ComponentSpec::of::<MinQuantityComponent>());
    }
    if order_by_price {
        specs.push(ComponentSpec::of::<PriceDescendingComponent>());
    }

    let config = FilterConfig::builder()
        .applies_to(all)
        .components(specs)
        .build()?;
    Ok(config)
}

fn build_report(filter: &Filter<Listings, ListingQuery>) -> Result<TraceReport> {
    let steps = filter
        .applied_filters()
        .iter()
        .enumerate()
        .map(|(index, step)| StepReport {
            index,
            component: step.component().name().to_string(),
            results: step.results().to_vec(),
            removed: step.removed().ids(),
        })
        .collect();

    Ok(TraceReport {
        steps,
        results: filter.results()?.to_vec(),
        removed: filter.removed()?.ids(),
    })
}

/// Handle the 'trace' command
fn handle_trace(
    all: Listings,
    query: ListingQuery,
    order_by_price: bool,
    step: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = build_config(all, &query, order_by_price)?;
    tracing::info!("Running filter with {} components", config.components().len());

    let filter = Filter::run(config, Some(&query)).context("Filter execution failed")?;
    let report = build_report(&filter)?;

    if let Some(index) = step {
        // validate through the filter so short-circuited steps report properly
        filter.at_step(index)?;
        let step = &report.steps[index];
        if json {
            println!("{}", serde_json::to_string_pretty(step)?);
        } else {
            print_step(step);
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Handle the 'list' command
fn handle_list(all: &Listings) {
    println!("{}", format!("{} listings:", all.count()).bold().blue());
    for listing in all.to_vec() {
        print_listing(&listing);
    }
}

fn print_report(report: &TraceReport) {
    if report.steps.is_empty() {
        println!("{}", "No components configured".yellow());
    }
    for step in &report.steps {
        print_step(step);
    }

    println!("{}", "Results:".bold().blue());
    for listing in &report.results {
        print_listing(listing);
    }
    println!(
        "{} {}",
        "Removed overall:".bold().red(),
        format_ids(&report.removed)
    );
}

fn print_step(step: &StepReport) {
    println!(
        "{} {}",
        format!("Step {}:", step.index).bold().blue(),
        step.component
    );
    println!(
        "{}kept ({}): {}",
        "• ".green(),
        step.results.len(),
        format_ids(&step.results.iter().map(|l| l.id).collect::<Vec<_>>())
    );
    println!(
        "{}removed ({}): {}",
        "• ".red(),
        step.removed.len(),
        format_ids(&step.removed)
    );
}

fn print_listing(listing: &Listing) {
    println!(
        "  {}: {} price {} qty {}",
        listing.id.to_string().green(),
        listing.category,
        listing.price,
        listing.quantity
    );
}

fn format_ids(ids: &[RecordId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
