//! In-memory collaborators backed by a `CatalogIndex`.
//!
//! Answers every collaborator call the way the accommodation backend does:
//! - location: comma-separated terms, all must match a location field
//! - guests: integer within the item's guest bounds
//! - dates: `YYYY-MM-DD` range covered by one availability period
//!
//! Queries with no matches answer `None`, mirroring the backend's empty body.
//! An optional artificial latency makes concurrency observable in tests and
//! demos.

use crate::session::Session;
use crate::traits::{
    CatalogSource, Recommender, ReservationSource, SourceError, SourceResult, UserDirectory,
};
use async_trait::async_trait;
use catalog::{CatalogIndex, Item, ItemId, Reservation, User};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serves every collaborator role from one shared index
#[derive(Clone)]
pub struct InMemorySource {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    index: Arc<CatalogIndex>,

    /// Delay applied before every answer
    latency: Duration,
}

impl InMemorySource {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self {
            index,
            latency: Duration::ZERO,
        }
    }

    /// Simulate a remote round trip (default: none)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn matching(&self, predicate: impl Fn(&Item) -> bool) -> Option<Vec<Item>> {
        let matches: Vec<Item> = self
            .index
            .items()
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect();

        if matches.is_empty() { None } else { Some(matches) }
    }
}

fn parse_date(field: &'static str, value: &str) -> SourceResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| SourceError::InvalidQuery {
        field,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

#[async_trait]
impl CatalogSource for InMemorySource {
    async fn fetch_all(&self) -> SourceResult<Vec<Item>> {
        self.round_trip().await;
        Ok(self.index.items().to_vec())
    }

    #[instrument(skip(self))]
    async fn fetch_by_location(&self, query: &str) -> SourceResult<Option<Vec<Item>>> {
        self.round_trip().await;
        let terms: Vec<&str> = query
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(None);
        }

        let found = self.matching(|item| terms.iter().all(|term| item.location.matches(term)));
        debug!("location matched {} items", found.as_ref().map_or(0, Vec::len));
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn fetch_by_guest_count(&self, query: &str) -> SourceResult<Option<Vec<Item>>> {
        self.round_trip().await;
        let guests: u32 = query
            .trim()
            .parse()
            .map_err(|err: std::num::ParseIntError| SourceError::InvalidQuery {
                field: "guests",
                value: query.to_string(),
                reason: err.to_string(),
            })?;

        let found = self.matching(|item| item.fits_guests(guests));
        debug!("guest count matched {} items", found.as_ref().map_or(0, Vec::len));
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn fetch_by_date_range(
        &self,
        start: &str,
        end: &str,
    ) -> SourceResult<Option<Vec<Item>>> {
        self.round_trip().await;
        let start_date = parse_date("start date", start)?;
        let end_date = parse_date("end date", end)?;
        if start_date > end_date {
            return Err(SourceError::InvalidQuery {
                field: "date range",
                value: format!("{}..{}", start, end),
                reason: "start is after end".to_string(),
            });
        }

        let found = self.matching(|item| {
            self.index
                .get_reservations(&item.id)
                .iter()
                .any(|period| period.covers(start_date, end_date))
        });
        debug!("date range matched {} items", found.as_ref().map_or(0, Vec::len));
        Ok(found)
    }

    async fn resolve_recommended(&self, ids: &[ItemId]) -> SourceResult<Option<Vec<Item>>> {
        self.round_trip().await;
        let resolved: Vec<Item> = ids
            .iter()
            .filter_map(|id| self.index.get_item(id).cloned())
            .collect();

        if resolved.is_empty() {
            Ok(None)
        } else {
            Ok(Some(resolved))
        }
    }
}

#[async_trait]
impl ReservationSource for InMemorySource {
    async fn fetch_reservations(&self, item_id: &str) -> SourceResult<Vec<Reservation>> {
        self.round_trip().await;
        if self.index.get_item(item_id).is_none() {
            return Err(SourceError::NotFound {
                entity: "item",
                id: item_id.to_string(),
            });
        }
        Ok(self.index.get_reservations(item_id).to_vec())
    }
}

#[async_trait]
impl UserDirectory for InMemorySource {
    async fn fetch_user_by_username(&self, username: &str) -> SourceResult<User> {
        self.round_trip().await;
        self.index
            .get_user_by_username(username)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                entity: "user",
                id: username.to_string(),
            })
    }

    async fn fetch_user_by_id(&self, id: &str) -> SourceResult<User> {
        self.round_trip().await;
        self.index
            .get_user(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                entity: "user",
                id: id.to_string(),
            })
    }
}

#[async_trait]
impl Recommender for InMemorySource {
    async fn fetch_recommended_ids(&self, session: &Session) -> SourceResult<Vec<ItemId>> {
        self.round_trip().await;
        let username = session.username.as_deref().ok_or_else(|| SourceError::NotFound {
            entity: "session user",
            id: String::new(),
        })?;
        Ok(self.index.get_recommendations(username).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Amenity, Location, Role};
    use std::time::Instant;

    fn item(id: &str, city: &str, country: &str, guests: (u32, u32), host: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Stay {}", id),
            location: Location {
                country: country.to_string(),
                city: city.to_string(),
                address: format!("{} street 1", id),
            },
            min_guests: guests.0,
            max_guests: guests.1,
            amenities: vec![Amenity::Wifi],
            username: host.to_string(),
        }
    }

    fn period(id: &str, item_id: &str, start: &str, end: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            item_id: item_id.to_string(),
            price_by_accommodation: 100.0,
            price_by_people: 30.0,
            start_date: NaiveDate::parse_from_str(start, DATE_FORMAT).unwrap(),
            end_date: NaiveDate::parse_from_str(end, DATE_FORMAT).unwrap(),
        }
    }

    fn create_test_source() -> InMemorySource {
        let mut index = CatalogIndex::new();
        index.insert_item(item("p1", "Paris", "France", (1, 2), "marie"));
        index.insert_item(item("p2", "Paris", "France", (2, 6), "luc"));
        index.insert_item(item("b1", "Belgrade", "Serbia", (1, 4), "jovan"));

        index.insert_reservation(period("r1", "p1", "2024-06-01", "2024-06-30"));
        index.insert_reservation(period("r2", "b1", "2024-06-10", "2024-06-20"));

        index.insert_user(User {
            id: "u-marie".to_string(),
            username: "marie".to_string(),
            role: Role::Host,
            featured: true,
        });
        index.insert_user(User {
            id: "u-luc".to_string(),
            username: "luc".to_string(),
            role: Role::Host,
            featured: false,
        });
        index.insert_recommendations("ana", vec!["b1".to_string(), "ghost".to_string()]);

        InMemorySource::new(Arc::new(index))
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_load_order() {
        let source = create_test_source();
        let all = source.fetch_all().await.unwrap();
        assert_eq!(ids(&all), vec!["p1", "p2", "b1"]);
    }

    #[tokio::test]
    async fn test_location_terms() {
        let source = create_test_source();

        let paris = source.fetch_by_location("Paris").await.unwrap().unwrap();
        assert_eq!(ids(&paris), vec!["p1", "p2"]);

        let narrowed = source.fetch_by_location("paris, p2 street").await.unwrap().unwrap();
        assert_eq!(ids(&narrowed), vec!["p2"]);

        assert!(source.fetch_by_location("Tokyo").await.unwrap().is_none());
        assert!(source.fetch_by_location(" , ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_guest_count() {
        let source = create_test_source();

        let two = source.fetch_by_guest_count("2").await.unwrap().unwrap();
        assert_eq!(ids(&two), vec!["p1", "p2", "b1"]);

        let five = source.fetch_by_guest_count(" 5 ").await.unwrap().unwrap();
        assert_eq!(ids(&five), vec!["p2"]);

        assert!(source.fetch_by_guest_count("40").await.unwrap().is_none());

        let err = source.fetch_by_guest_count("many").await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidQuery { field: "guests", .. }));
    }

    #[tokio::test]
    async fn test_date_range() {
        let source = create_test_source();

        let both = source
            .fetch_by_date_range("2024-06-12", "2024-06-18")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ids(&both), vec!["p1", "b1"]);

        let only_paris = source
            .fetch_by_date_range("2024-06-02", "2024-06-25")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ids(&only_paris), vec!["p1"]);

        assert!(
            source
                .fetch_by_date_range("2025-01-01", "2025-01-02")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_date_range_rejects_bad_input() {
        let source = create_test_source();

        assert!(source.fetch_by_date_range("", "2024-06-02").await.is_err());
        assert!(source.fetch_by_date_range("2024-06-10", "2024-06-01").await.is_err());
    }

    #[tokio::test]
    async fn test_reservations() {
        let source = create_test_source();
        assert_eq!(source.fetch_reservations("p1").await.unwrap().len(), 1);
        assert!(source.fetch_reservations("p2").await.unwrap().is_empty());
        assert!(source.fetch_reservations("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_featured_lookup_chain() {
        let source = create_test_source();
        assert!(source.featured_status_by_username("marie").await.unwrap());
        assert!(!source.featured_status_by_username("luc").await.unwrap());

        let err = source.featured_status_by_username("jovan").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { entity: "user", .. }));
    }

    #[tokio::test]
    async fn test_recommendations_resolve_in_rank_order() {
        let source = create_test_source();

        let ids_for_ana = source
            .fetch_recommended_ids(&Session::guest("ana"))
            .await
            .unwrap();
        assert_eq!(ids_for_ana, vec!["b1", "ghost"]);

        let resolved = source.resolve_recommended(&ids_for_ana).await.unwrap().unwrap();
        assert_eq!(ids(&resolved), vec!["b1"]);

        assert!(
            source
                .resolve_recommended(&["ghost".to_string()])
                .await
                .unwrap()
                .is_none()
        );
        assert!(source.fetch_recommended_ids(&Session::anonymous()).await.is_err());
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let source = create_test_source().with_latency(Duration::from_millis(20));
        let start = Instant::now();
        source.fetch_all().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
