//! Per-item collaborator fan-out with an explicit join.
//!
//! Every item in the universe gets exactly one lookup. The returned future
//! completes only once all of them have answered, failed, or timed out, so
//! callers combine complete candidate sets instead of guessing with a delay.

use crate::config::EngineConfig;
use catalog::Item;
use futures::stream::{self, StreamExt};
use sources::{SourceError, SourceResult};
use std::future::Future;
use tracing::warn;

/// Run `lookup` for every item, at most `config.lookup_concurrency` at a time.
///
/// Results come back in universe order. Failed and timed-out lookups are
/// logged and dropped.
pub async fn lookup_each<'a, T, F, Fut>(
    universe: &'a [Item],
    config: &EngineConfig,
    criterion: &'static str,
    lookup: F,
) -> Vec<(&'a Item, T)>
where
    F: Fn(&'a Item) -> Fut,
    Fut: Future<Output = SourceResult<T>>,
{
    let timeout = config.lookup_timeout;

    let pending: Vec<_> = universe
        .iter()
        .map(|item| {
            let lookup = lookup(item);
            async move {
                match tokio::time::timeout(timeout, lookup).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SourceError::Timeout(timeout)),
                }
            }
        })
        .collect();

    let outcomes: Vec<SourceResult<T>> = stream::iter(pending)
        .buffered(config.lookup_concurrency.max(1))
        .collect()
        .await;

    universe
        .iter()
        .zip(outcomes)
        .filter_map(|(item, outcome)| match outcome {
            Ok(value) => Some((item, value)),
            Err(err) => {
                warn!(criterion, item_id = %item.id, error = %err, "per-item lookup failed");
                None
            }
        })
        .collect()
}
