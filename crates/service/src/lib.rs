//! Service crate for the listing catalog.
//!
//! This crate contains the orchestrator that owns the visible catalog and
//! runs load, search and filter cycles against it.

pub mod orchestrator;

pub use orchestrator::{CatalogSnapshot, CycleOutcome, CycleReport, ListingService};
