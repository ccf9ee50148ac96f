//! Criterion keeping items whose host is featured.

use crate::config::EngineConfig;
use crate::lookup::lookup_each;
use crate::notice::NO_FEATURED_MATCHES;
use crate::traits::Criterion;
use async_trait::async_trait;
use catalog::Item;
use sources::UserDirectory;
use std::sync::Arc;
use tracing::debug;

/// Keeps items owned by a featured host.
///
/// Host status goes through `UserDirectory::featured_status_by_username`,
/// which by default chains the username and id lookups. All lookups are
/// joined before the candidate set is returned.
pub struct FeaturedHostCriterion {
    enabled: bool,
    users: Arc<dyn UserDirectory>,
    config: EngineConfig,
}

impl FeaturedHostCriterion {
    pub fn new(enabled: bool, users: Arc<dyn UserDirectory>, config: EngineConfig) -> Self {
        Self {
            enabled,
            users,
            config,
        }
    }
}

#[async_trait]
impl Criterion for FeaturedHostCriterion {
    fn name(&self) -> &'static str {
        "featured host"
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn empty_notice(&self) -> &'static str {
        NO_FEATURED_MATCHES
    }

    async fn resolve(&self, universe: &[Item]) -> Vec<Item> {
        if !self.is_active() {
            return Vec::new();
        }

        let statuses = lookup_each(universe, &self.config, self.name(), |item| {
            self.users.featured_status_by_username(&item.username)
        })
        .await;

        let matched: Vec<Item> = statuses
            .into_iter()
            .filter(|(_, featured)| *featured)
            .map(|(item, _)| item.clone())
            .collect();

        debug!("featured hosts kept {} of {} items", matched.len(), universe.len());
        matched
    }
}
