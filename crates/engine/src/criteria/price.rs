//! Criterion keeping items with a reservation inside a price range.

use crate::config::EngineConfig;
use crate::lookup::lookup_each;
use crate::notice::NO_PRICE_MATCHES;
use crate::traits::Criterion;
use async_trait::async_trait;
use catalog::{Item, Reservation};
use sources::ReservationSource;
use std::sync::Arc;
use tracing::debug;

/// Keeps items with at least one qualifying reservation.
///
/// ## Algorithm
/// 1. Fetch the reservations of every item in the universe (one lookup each,
///    joined before returning)
/// 2. Keep the item if any reservation passes [`qualifies`]
///
/// Active only when both bounds are strictly positive.
pub struct PriceRangeCriterion {
    from: f64,
    to: f64,
    reservations: Arc<dyn ReservationSource>,
    config: EngineConfig,
}

impl PriceRangeCriterion {
    pub fn new(
        from: f64,
        to: f64,
        reservations: Arc<dyn ReservationSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            from,
            to,
            reservations,
            config,
        }
    }
}

/// Price test for one reservation.
///
/// Each bound is checked against both price fields independently, so a
/// reservation passes when one field clears the lower bound and the other
/// clears the upper bound. Both bounds are inclusive.
pub fn qualifies(reservation: &Reservation, from: f64, to: f64) -> bool {
    let accommodation = reservation.price_by_accommodation;
    let people = reservation.price_by_people;

    (accommodation >= from || people >= from) && (accommodation <= to || people <= to)
}

#[async_trait]
impl Criterion for PriceRangeCriterion {
    fn name(&self) -> &'static str {
        "price"
    }

    fn is_active(&self) -> bool {
        self.from > 0.0 && self.to > 0.0
    }

    fn empty_notice(&self) -> &'static str {
        NO_PRICE_MATCHES
    }

    async fn resolve(&self, universe: &[Item]) -> Vec<Item> {
        if !self.is_active() {
            return Vec::new();
        }

        let priced = lookup_each(universe, &self.config, self.name(), |item| {
            self.reservations.fetch_reservations(&item.id)
        })
        .await;

        let matched: Vec<Item> = priced
            .into_iter()
            .filter(|(_, reservations)| {
                reservations
                    .iter()
                    .any(|reservation| qualifies(reservation, self.from, self.to))
            })
            .map(|(item, _)| item.clone())
            .collect();

        debug!(
            "price {}..{} kept {} of {} items",
            self.from,
            self.to,
            matched.len(),
            universe.len()
        );
        matched
    }
}
