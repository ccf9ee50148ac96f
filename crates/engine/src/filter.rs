//! Filter cycle over price, amenities and featured hosts.
//!
//! Unlike search, rules are chosen by which criteria the user engaged, not by
//! which sets came back non-empty. The universe is the catalog currently on
//! display, and a cycle with nothing engaged leaves it untouched.

use crate::combine::{apply_plan, select_rule, Plan, Rule, SLOTS};
use crate::config::EngineConfig;
use crate::criteria::{AmenitiesCriterion, FeaturedHostCriterion, PriceRangeCriterion};
use crate::notice::Notice;
use crate::traits::Criterion;
use catalog::{Amenity, Item};
use sources::Sources;
use std::time::Instant;
use tracing::{debug, info, instrument};

const PRICE: usize = 0;
const AMENITIES: usize = 1;
const FEATURED: usize = 2;

/// Filter combination rules, first match wins.
pub const FILTER_RULES: [Rule; 8] = [
    Rule::new("price only", [true, false, false], Plan::Single(PRICE)),
    Rule::new("price, amenities and featured", [true, true, true], Plan::All),
    Rule::new("amenities only", [false, true, false], Plan::Single(AMENITIES)),
    Rule::new("featured only", [false, false, true], Plan::Single(FEATURED)),
    Rule::new("price and amenities", [true, true, false], Plan::Pair(PRICE, AMENITIES)),
    Rule::new("price and featured", [true, false, true], Plan::Pair(PRICE, FEATURED)),
    Rule::new("amenities and featured", [false, true, true], Plan::Pair(AMENITIES, FEATURED)),
    Rule::new("nothing", [false, false, false], Plan::Inactive),
];

/// Filter form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    pub price_from: f64,
    pub price_to: f64,
    pub amenities: Vec<Amenity>,
    pub featured_only: bool,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, from: f64, to: f64) -> Self {
        self.price_from = from;
        self.price_to = to;
        self
    }

    pub fn with_amenities(mut self, amenities: impl IntoIterator<Item = Amenity>) -> Self {
        self.amenities = amenities.into_iter().collect();
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }
}

/// Criteria engaged in one cycle, computed fresh from the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterFlags {
    pub price: bool,
    pub amenities: bool,
    pub featured_host: bool,
}

/// Everything one filter cycle produced
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub flags: FilterFlags,
    pub rule: &'static str,
    pub notices: Vec<Notice>,
    /// `None` when nothing was engaged and the catalog stays as it is
    pub result: Option<Vec<Item>>,
}

pub struct FilterEngine {
    sources: Sources,
    config: EngineConfig,
}

impl FilterEngine {
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one filter cycle against `universe`.
    ///
    /// ## Algorithm
    /// 1. Build the three criteria from the request
    /// 2. Resolve them concurrently; each one joins its own per-item lookups
    /// 3. Report every engaged criterion that matched nothing
    /// 4. Pick the rule matching the engaged flags and apply it
    #[instrument(skip(self, universe), fields(universe = universe.len()))]
    pub async fn filter(&self, request: &FilterRequest, universe: &[Item]) -> FilterOutcome {
        let start = Instant::now();

        let price = PriceRangeCriterion::new(
            request.price_from,
            request.price_to,
            self.sources.reservations.clone(),
            self.config.clone(),
        );
        let amenities = AmenitiesCriterion::new(request.amenities.clone());
        let featured = FeaturedHostCriterion::new(
            request.featured_only,
            self.sources.users.clone(),
            self.config.clone(),
        );
        let criteria: [&dyn Criterion; SLOTS] = [&price, &amenities, &featured];

        let flags = FilterFlags {
            price: price.is_active(),
            amenities: amenities.is_active(),
            featured_host: featured.is_active(),
        };

        let (price_set, amenity_set, featured_set) = tokio::join!(
            price.resolve(universe),
            amenities.resolve(universe),
            featured.resolve(universe),
        );
        let sets: [&[Item]; SLOTS] = [&price_set, &amenity_set, &featured_set];

        let mut notices = Vec::new();
        for (criterion, set) in criteria.iter().zip(sets) {
            if criterion.is_active() {
                debug!("{} matched {} items", criterion.name(), set.len());
                if set.is_empty() {
                    notices.push(Notice::info(criterion.empty_notice()));
                }
            }
        }

        let active = [flags.price, flags.amenities, flags.featured_host];
        let rule = select_rule(&FILTER_RULES, active)
            .copied()
            .unwrap_or(Rule::new("unmatched", active, Plan::Inactive));
        let result = apply_plan(sets, rule.plan);

        info!(
            "filter applied '{}' in {:?} ({})",
            rule.name,
            start.elapsed(),
            result
                .as_ref()
                .map_or("unchanged".to_string(), |items| format!("{} items", items.len()))
        );

        FilterOutcome {
            flags,
            rule: rule.name,
            notices,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NO_AMENITY_MATCHES, NO_PRICE_MATCHES};
    use crate::testing::{create_test_sources, ids};

    async fn run(request: FilterRequest) -> FilterOutcome {
        let sources = create_test_sources();
        let universe = sources.catalog.fetch_all().await.unwrap();
        FilterEngine::new(sources).filter(&request, &universe).await
    }

    fn result_ids(outcome: &FilterOutcome) -> Vec<&str> {
        ids(outcome.result.as_deref().unwrap())
    }

    #[tokio::test]
    async fn test_nothing_engaged_leaves_catalog() {
        let outcome = run(FilterRequest::new()).await;

        assert_eq!(outcome.flags, FilterFlags::default());
        assert_eq!(outcome.rule, "nothing");
        assert!(outcome.result.is_none());
        assert!(outcome.notices.is_empty());
    }

    #[tokio::test]
    async fn test_price_only() {
        let outcome = run(FilterRequest::new().with_price(100.0, 200.0)).await;

        assert_eq!(outcome.rule, "price only");
        assert_eq!(result_ids(&outcome), vec!["1", "3", "4"]);
    }

    #[tokio::test]
    async fn test_amenities_only() {
        let outcome = run(FilterRequest::new().with_amenities([Amenity::Wifi])).await;

        assert_eq!(outcome.rule, "amenities only");
        assert_eq!(result_ids(&outcome), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_featured_only() {
        let outcome = run(FilterRequest::new().featured_only()).await;

        assert_eq!(outcome.rule, "featured only");
        assert_eq!(result_ids(&outcome), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_price_and_amenities() {
        let request = FilterRequest::new()
            .with_price(100.0, 200.0)
            .with_amenities([Amenity::Pool]);
        let outcome = run(request).await;

        assert_eq!(outcome.rule, "price and amenities");
        assert_eq!(result_ids(&outcome), vec!["1"]);
    }

    #[test]
    fn test_every_pattern_selects_one_filter_rule() {
        for mask in 0u8..8 {
            let active = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0];
            let matching = FILTER_RULES.iter().filter(|rule| rule.pattern == active).count();
            assert_eq!(matching, 1, "pattern {:?}", active);
        }
    }

    #[tokio::test]
    async fn test_price_and_featured() {
        let request = FilterRequest::new().with_price(100.0, 200.0).featured_only();
        let outcome = run(request).await;

        // price keeps 1, 3, 4; featured hosts own 1 and 3
        assert_eq!(outcome.rule, "price and featured");
        assert_eq!(result_ids(&outcome), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_all_three() {
        let request = FilterRequest::new()
            .with_price(90.0, 160.0)
            .with_amenities([Amenity::Wifi])
            .featured_only();
        let outcome = run(request).await;

        assert_eq!(outcome.rule, "price, amenities and featured");
        assert_eq!(result_ids(&outcome), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_engaged_but_empty_still_intersects() {
        let request = FilterRequest::new()
            .with_price(1000.0, 2000.0)
            .with_amenities([Amenity::Wifi]);
        let outcome = run(request).await;

        assert_eq!(outcome.rule, "price and amenities");
        assert_eq!(outcome.result, Some(vec![]));
        assert_eq!(outcome.notices, vec![Notice::info(NO_PRICE_MATCHES)]);
    }

    #[tokio::test]
    async fn test_flags_do_not_leak_between_cycles() {
        let sources = create_test_sources();
        let universe = sources.catalog.fetch_all().await.unwrap();
        let engine = FilterEngine::new(sources);

        let first = engine
            .filter(&FilterRequest::new().with_amenities([Amenity::Washer]), &universe)
            .await;
        assert_eq!(first.notices, vec![Notice::info(NO_AMENITY_MATCHES)]);

        let second = engine.filter(&FilterRequest::new().featured_only(), &universe).await;
        assert_eq!(
            second.flags,
            FilterFlags {
                featured_host: true,
                ..FilterFlags::default()
            }
        );
        assert!(second.notices.is_empty());
    }

    #[tokio::test]
    async fn test_universe_is_current_catalog() {
        let sources = create_test_sources();
        let paris = sources.catalog.fetch_by_location("Paris").await.unwrap().unwrap();
        let outcome = FilterEngine::new(sources)
            .filter(&FilterRequest::new().featured_only(), &paris)
            .await;

        assert_eq!(result_ids(&outcome), vec!["1"]);
    }
}
