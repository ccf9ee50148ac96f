//! Error types for the engine crate.

use sources::SourceError;
use thiserror::Error;

/// Failures that abort a whole cycle.
///
/// Per-item lookup failures inside the filter criteria never surface here;
/// they are logged and the item is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// One of the joined search lookups failed
    #[error("{criterion} lookup failed: {source}")]
    Lookup {
        criterion: &'static str,
        #[source]
        source: SourceError,
    },

    /// The full-catalog fetch failed
    #[error("catalog fetch failed: {0}")]
    Catalog(#[source] SourceError),
}
