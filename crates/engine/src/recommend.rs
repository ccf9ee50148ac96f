//! Secondary "recommended for you" list for guest consumers.

use catalog::Item;
use sources::{Session, Sources};
use tracing::{debug, instrument, warn};

/// Resolved recommendations and how many there are
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub items: Vec<Item>,
    pub count: usize,
}

/// Fetches ranked identifiers and resolves them into items.
///
/// Purely additive: every failure is logged and yields `None`, so the
/// caller's primary catalog is never affected.
pub struct RecommendationAugmenter {
    sources: Sources,
}

impl RecommendationAugmenter {
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }

    #[instrument(skip(self), fields(username = session.username.as_deref().unwrap_or("")))]
    pub async fn augment(&self, session: &Session) -> Option<Recommendations> {
        if !session.is_guest() {
            debug!("session is not a signed-in guest, skipping recommendations");
            return None;
        }

        let ids = match self.sources.recommender.fetch_recommended_ids(session).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!("recommended identifiers unavailable: {}", err);
                return None;
            }
        };

        match self.sources.catalog.resolve_recommended(&ids).await {
            Ok(Some(items)) => {
                debug!("resolved {} of {} recommended items", items.len(), ids.len());
                let count = items.len();
                Some(Recommendations { items, count })
            }
            Ok(None) => {
                debug!("no recommended items resolved");
                None
            }
            Err(err) => {
                warn!("recommended items could not be resolved: {}", err);
                None
            }
        }
    }
}
