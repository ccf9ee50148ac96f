//! Collaborator contracts the engines consume.
//!
//! Each trait stands in for a remote service (catalog, reservations, auth,
//! recommender). The engines only see these traits, so a test double, the
//! in-memory store, or an HTTP client can sit behind them.

use async_trait::async_trait;
use catalog::{Item, ItemId, Reservation, User};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::session::Session;

/// Errors a collaborator call can fail with
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The query text couldn't be interpreted (bad number, bad date, ...)
    #[error("invalid {field} query '{value}': {reason}")]
    InvalidQuery {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Transport-level failure of the remote service
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("call timed out after {0:?}")]
    Timeout(Duration),
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Listing lookups.
///
/// The criterion lookups return `Ok(None)` when the service answers with an
/// empty body (no matches), which callers report differently from an empty
/// list they produced themselves.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all(&self) -> SourceResult<Vec<Item>>;

    async fn fetch_by_location(&self, query: &str) -> SourceResult<Option<Vec<Item>>>;

    async fn fetch_by_guest_count(&self, query: &str) -> SourceResult<Option<Vec<Item>>>;

    async fn fetch_by_date_range(&self, start: &str, end: &str)
        -> SourceResult<Option<Vec<Item>>>;

    /// Resolve ranked identifiers into items, keeping rank order
    async fn resolve_recommended(&self, ids: &[ItemId]) -> SourceResult<Option<Vec<Item>>>;
}

#[async_trait]
pub trait ReservationSource: Send + Sync {
    async fn fetch_reservations(&self, item_id: &str) -> SourceResult<Vec<Reservation>>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn fetch_user_by_username(&self, username: &str) -> SourceResult<User>;

    async fn fetch_user_by_id(&self, id: &str) -> SourceResult<User>;

    /// Whether the account behind `username` is a featured host.
    ///
    /// The auth service only exposes the full record by id, so the default
    /// resolves username -> id -> user. Implementations that can answer in
    /// one call should override this.
    async fn featured_status_by_username(&self, username: &str) -> SourceResult<bool> {
        let by_name = self.fetch_user_by_username(username).await?;
        let user = self.fetch_user_by_id(&by_name.id).await?;
        Ok(user.featured)
    }
}

#[async_trait]
pub trait Recommender: Send + Sync {
    /// Ranked item identifiers for the signed-in consumer
    async fn fetch_recommended_ids(&self, session: &Session) -> SourceResult<Vec<ItemId>>;
}

/// The full set of collaborators, shared between engines.
#[derive(Clone)]
pub struct Sources {
    pub catalog: Arc<dyn CatalogSource>,
    pub reservations: Arc<dyn ReservationSource>,
    pub users: Arc<dyn UserDirectory>,
    pub recommender: Arc<dyn Recommender>,
}

impl Sources {
    /// Use one value for every collaborator role
    pub fn from_shared<S>(source: Arc<S>) -> Self
    where
        S: CatalogSource + ReservationSource + UserDirectory + Recommender + 'static,
    {
        Self {
            catalog: source.clone(),
            reservations: source.clone(),
            users: source.clone(),
            recommender: source,
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogSource>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_reservations(mut self, reservations: Arc<dyn ReservationSource>) -> Self {
        self.reservations = reservations;
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = users;
        self
    }

    pub fn with_recommender(mut self, recommender: Arc<dyn Recommender>) -> Self {
        self.recommender = recommender;
        self
    }
}
