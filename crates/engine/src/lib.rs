//! Search and filter engines for the listing catalog.
//!
//! This crate provides:
//! - SearchEngine: location, guest count and date lookups joined and combined
//! - FilterEngine: price, amenity and featured-host criteria over the
//!   currently displayed catalog
//! - RecommendationAugmenter: ranked extras for signed-in guests
//!
//! ## Architecture
//! Both engines run the same cycle:
//! 1. Resolve three candidate sets concurrently and wait for all of them
//! 2. Derive which criteria are engaged (search: non-empty sets, filter:
//!    explicit request fields)
//! 3. Pick the first matching rule from an ordered table
//! 4. Intersect the chosen sets by item identifier
//!
//! Each cycle returns an outcome value; no flags or accumulators outlive it.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{FilterEngine, FilterRequest, SearchEngine, SearchQuery, SearchResult};
//!
//! let search = SearchEngine::new(sources.clone());
//! let outcome = search
//!     .search(&SearchQuery::new().with_location("Paris").with_guests("2"))
//!     .await?;
//!
//! if let SearchResult::Items(items) = outcome.result {
//!     let filter = FilterEngine::new(sources);
//!     let request = FilterRequest::new().with_price(100.0, 200.0);
//!     let filtered = filter.filter(&request, &items).await;
//! }
//! ```

pub mod combine;
pub mod config;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod notice;
pub mod recommend;
pub mod search;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export main types
pub use combine::{intersect_by_id, Plan, Rule};
pub use config::EngineConfig;
pub use error::EngineError;
pub use filter::{FilterEngine, FilterFlags, FilterOutcome, FilterRequest, FILTER_RULES};
pub use notice::{Notice, NoticeLevel};
pub use recommend::{RecommendationAugmenter, Recommendations};
pub use search::{SearchCriteria, SearchEngine, SearchOutcome, SearchQuery, SearchResult, SEARCH_RULES};
pub use traits::Criterion;
