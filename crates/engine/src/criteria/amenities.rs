//! Criterion keeping items that offer a requested amenity.

use crate::notice::NO_AMENITY_MATCHES;
use crate::traits::Criterion;
use async_trait::async_trait;
use catalog::{Amenity, Item};
use std::collections::HashSet;
use tracing::debug;

/// Keeps items sharing at least one amenity with the requested set.
///
/// ## Algorithm
/// Walks the universe once and adds each qualifying item the first time its
/// identifier is seen, so the candidate set never holds the same item twice.
pub struct AmenitiesCriterion {
    wanted: Vec<Amenity>,
}

impl AmenitiesCriterion {
    pub fn new(wanted: Vec<Amenity>) -> Self {
        Self { wanted }
    }
}

#[async_trait]
impl Criterion for AmenitiesCriterion {
    fn name(&self) -> &'static str {
        "amenities"
    }

    fn is_active(&self) -> bool {
        !self.wanted.is_empty()
    }

    fn empty_notice(&self) -> &'static str {
        NO_AMENITY_MATCHES
    }

    async fn resolve(&self, universe: &[Item]) -> Vec<Item> {
        if !self.is_active() {
            return Vec::new();
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let matched: Vec<Item> = universe
            .iter()
            .filter(|item| item.has_any_amenity(&self.wanted))
            .filter(|item| seen.insert(item.id.as_str()))
            .cloned()
            .collect();

        debug!("amenities {:?} kept {} of {} items", self.wanted, matched.len(), universe.len());
        matched
    }
}
