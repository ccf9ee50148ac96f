//! # Sources Crate
//!
//! Collaborator contracts for the listing engines, plus an in-memory
//! implementation over a `CatalogIndex`.
//!
//! ## Components
//!
//! ### Traits
//! - `CatalogSource`: full catalog and the three search lookups
//! - `ReservationSource`: priced availability periods per item
//! - `UserDirectory`: host lookups for the featured-host filter
//! - `Recommender`: ranked identifiers for guest consumers
//!
//! ### InMemorySource
//! Serves all four roles from one shared index, with optional latency.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use sources::{InMemorySource, Sources};
//! use std::sync::Arc;
//!
//! let index = Arc::new(CatalogIndex::load_from_dir("data/sample".as_ref())?);
//! let sources = Sources::from_shared(Arc::new(InMemorySource::new(index)));
//!
//! let paris = sources.catalog.fetch_by_location("Paris").await?;
//! ```

pub mod memory;
pub mod session;
pub mod traits;

pub use memory::InMemorySource;
pub use session::Session;
pub use traits::{
    CatalogSource, Recommender, ReservationSource, SourceError, SourceResult, Sources,
    UserDirectory,
};
