//! Example: Query the in-memory collaborators
//!
//! Run with: cargo run --package sources --example query_sources
//!
//! This example shows how to:
//! 1. Load the sample catalog
//! 2. Wrap it in an InMemorySource with simulated latency
//! 3. Run the three search lookups concurrently
//! 4. Check a host's featured status through the chained user lookup

use catalog::CatalogIndex;
use sources::{InMemorySource, Sources};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,sources=debug")
        .init();

    println!("=== StayFinder Collaborator Example ===\n");

    let index = CatalogIndex::load_from_dir(Path::new("data/sample"))?;
    let source = InMemorySource::new(Arc::new(index)).with_latency(Duration::from_millis(40));
    let sources = Sources::from_shared(Arc::new(source));

    // Three lookups, ~40ms each, joined: the total stays close to one round trip
    let start = Instant::now();
    let (location, guests, dates) = tokio::join!(
        sources.catalog.fetch_by_location("Paris"),
        sources.catalog.fetch_by_guest_count("2"),
        sources.catalog.fetch_by_date_range("2024-07-01", "2024-07-10"),
    );
    println!("Joined lookups in {:?}", start.elapsed());

    for (label, found) in [("location", location?), ("guests", guests?), ("dates", dates?)] {
        let ids: Vec<String> = found
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.id)
            .collect();
        println!("  {:<8} -> {}", label, ids.join(", "));
    }

    for host in ["marie", "luc"] {
        let featured = sources.users.featured_status_by_username(host).await?;
        println!("Host {} featured: {}", host, featured);
    }

    Ok(())
}
