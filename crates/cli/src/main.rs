use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use catalog::{Amenity, Item, Role};
use engine::{EngineConfig, FilterRequest, NoticeLevel, SearchQuery};
use service::{CycleOutcome, CycleReport, ListingService};
use sources::Session;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// StayFinder - accommodation search and filtering
#[derive(Parser)]
#[command(name = "stayfinder")]
#[command(about = "Search and filter accommodation listings", long_about = None)]
struct Cli {
    /// Directory holding items.json, reservations.json, users.json and recommendations.json
    #[arg(short, long, env = "STAYFINDER_DATA", default_value = "data/sample")]
    data_dir: PathBuf,

    /// Session role (guest, host or anonymous)
    #[arg(long, default_value = "anonymous")]
    role: Role,

    /// Signed-in username; omit for an anonymous session
    #[arg(long)]
    username: Option<String>,

    /// Deadline for each per-item lookup, in milliseconds
    #[arg(long, default_value = "5000")]
    lookup_timeout_ms: u64,

    /// Maximum in-flight per-item lookups
    #[arg(long, default_value = "16")]
    concurrency: usize,

    /// Simulated collaborator latency, in milliseconds
    #[arg(long, default_value = "0")]
    latency_ms: u64,

    /// Log filter, overriding RUST_LOG (e.g. "debug" or "engine=debug")
    #[arg(long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full catalog, plus recommendations for guests
    Browse,

    /// Search by location, dates and guest count
    Search(SearchArgs),

    /// Filter the displayed catalog by price, amenities and featured hosts
    Filter {
        /// Narrow the catalog with a search first
        #[command(flatten)]
        search: SearchArgs,

        /// Lower price bound (0 disables the price filter)
        #[arg(long, default_value = "0")]
        price_from: f64,

        /// Upper price bound (0 disables the price filter)
        #[arg(long, default_value = "0")]
        price_to: f64,

        /// Requested amenity; repeat for several (e.g. --amenity wifi --amenity pool)
        #[arg(long = "amenity")]
        amenities: Vec<Amenity>,

        /// Only stays hosted by featured hosts
        #[arg(long)]
        featured: bool,
    },
}

#[derive(Args, Clone, Default)]
struct SearchArgs {
    /// Comma-separated location terms (e.g. "Paris" or "Lisbon, Portugal")
    #[arg(long)]
    location: Option<String>,

    /// First night, YYYY-MM-DD
    #[arg(long)]
    from: Option<String>,

    /// Last night, YYYY-MM-DD
    #[arg(long)]
    to: Option<String>,

    /// Number of guests
    #[arg(long)]
    guests: Option<String>,
}

impl SearchArgs {
    fn is_empty(&self) -> bool {
        self.location.is_none() && self.from.is_none() && self.to.is_none() && self.guests.is_none()
    }

    fn to_query(&self) -> SearchQuery {
        SearchQuery {
            location: self.location.clone(),
            start_date: self.from.clone(),
            end_date: self.to.clone(),
            guests: self.guests.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match &cli.log {
        Some(directives) => tracing_subscriber::EnvFilter::new(directives),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let session = build_session(&cli)?;
    let config = EngineConfig::new()
        .with_lookup_concurrency(cli.concurrency)
        .with_lookup_timeout(Duration::from_millis(cli.lookup_timeout_ms));

    println!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let service = ListingService::from_dir(
        &cli.data_dir,
        Duration::from_millis(cli.latency_ms),
        config,
    )?;
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Browse => handle_browse(&service, &session).await?,
        Commands::Search(search) => handle_search(&service, &session, &search).await?,
        Commands::Filter {
            search,
            price_from,
            price_to,
            amenities,
            featured,
        } => {
            let mut request = FilterRequest::new()
                .with_price(price_from, price_to)
                .with_amenities(amenities);
            request.featured_only = featured;
            handle_filter(&service, &session, &search, &request).await?
        }
    }

    Ok(())
}

fn build_session(cli: &Cli) -> Result<Session> {
    match (&cli.username, cli.role) {
        (Some(username), role) => Ok(Session::signed_in(username.clone(), role)),
        (None, Role::Anonymous) => Ok(Session::anonymous()),
        (None, role) => bail!("--role {:?} needs --username", role),
    }
}

/// Handle the 'browse' command
async fn handle_browse(service: &ListingService, session: &Session) -> Result<()> {
    let report = service.load_all(session).await;
    print_report("Browse", &report);
    print_catalog(service).await;
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(
    service: &ListingService,
    session: &Session,
    search: &SearchArgs,
) -> Result<()> {
    let report = service.search(&search.to_query(), session).await;
    print_report("Search", &report);
    print_catalog(service).await;
    Ok(())
}

/// Handle the 'filter' command
///
/// The filter works on whatever is displayed, so the catalog is populated
/// first: by the given search, or by a full load.
async fn handle_filter(
    service: &ListingService,
    session: &Session,
    search: &SearchArgs,
    request: &FilterRequest,
) -> Result<()> {
    let shown = if search.is_empty() {
        service.load_all(session).await
    } else {
        service.search(&search.to_query(), session).await
    };
    if let CycleOutcome::Failed { reason } = &shown.outcome {
        bail!("could not populate the catalog: {}", reason);
    }
    info!("filtering {} displayed items", service.snapshot().await.items.len());

    let report = service.filter(request).await;
    print_report("Filter", &report);
    print_catalog(service).await;
    Ok(())
}

fn print_report(label: &str, report: &CycleReport) {
    let outcome = match &report.outcome {
        CycleOutcome::Committed { items } => format!("{} items", items).green(),
        CycleOutcome::Unchanged => "no criteria, catalog unchanged".yellow(),
        CycleOutcome::Superseded => "superseded".yellow(),
        CycleOutcome::Failed { reason } => format!("failed: {}", reason).red(),
    };
    println!("{} (cycle {}): {}", label.bold().blue(), report.generation, outcome);

    for notice in &report.notices {
        match notice.level {
            NoticeLevel::Info => println!("  {} {}", "ℹ".cyan(), notice.message),
            NoticeLevel::Error => println!("  {} {}", "✗".red(), notice.message),
        }
    }
}

async fn print_catalog(service: &ListingService) {
    let snapshot = service.snapshot().await;

    println!("{}", "Listings:".bold().blue());
    if snapshot.items.is_empty() {
        println!("  (none)");
    }
    for (rank, item) in snapshot.items.iter().enumerate() {
        print_item(rank + 1, item);
    }

    if snapshot.recommended_count > 0 {
        println!(
            "{}",
            format!("Recommended for you ({}):", snapshot.recommended_count).bold().magenta()
        );
        for (rank, item) in snapshot.recommended.iter().enumerate() {
            print_item(rank + 1, item);
        }
    }
}

fn print_item(rank: usize, item: &Item) {
    let amenities = item
        .amenities
        .iter()
        .map(|amenity| amenity.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}. {} [{}] - {}, {}-{} guests, host {}",
        rank.to_string().green(),
        item.name,
        item.id.dimmed(),
        item.location,
        item.min_guests,
        item.max_guests,
        item.username
    );
    if !amenities.is_empty() {
        println!("   {}", amenities);
    }
}
