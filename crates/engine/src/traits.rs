//! Core trait for filter criteria.
//!
//! A criterion turns the current universe of items into one candidate set.
//! The filter engine resolves its three criteria concurrently and hands the
//! sets to the combination step.

use async_trait::async_trait;
use catalog::Item;

/// One dimension of the filter cycle.
///
/// ## Design Note
/// - `Send + Sync` so the engine can resolve criteria concurrently
/// - `resolve` never fails: per-item collaborator errors are logged and the
///   item is left out of the candidate set
#[async_trait]
pub trait Criterion: Send + Sync {
    /// Returns the name of this criterion (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Whether the user engaged this criterion for the current cycle
    fn is_active(&self) -> bool;

    /// Informational message reported when an active criterion matches nothing
    fn empty_notice(&self) -> &'static str;

    /// Produce the candidate set for this criterion.
    ///
    /// # Arguments
    /// * `universe` - The currently displayed catalog
    ///
    /// # Returns
    /// The qualifying items in universe order; empty when inactive.
    async fn resolve(&self, universe: &[Item]) -> Vec<Item>;
}
