//! Core domain types for the listing catalog.
//!
//! Everything the search and filter engines combine is built from these:
//! - `Item`: a listable stay (the catalog's principal entity)
//! - `Reservation`: a priced availability period tied to one item
//! - `User`: an account, used to resolve an item's host
//!
//! Identifiers are plain strings compared by value. Two `Item` values with
//! the same `id` are the same listing even when the rest of their data
//! differs (sources may return partial records).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a listing
pub type ItemId = String;

/// Unique identifier for a user account
pub type UserId = String;

// =============================================================================
// Item-related Types
// =============================================================================

/// Where a listing is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub address: String,
}

impl Location {
    /// Case-insensitive substring match against any of the location fields.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return false;
        }
        [&self.country, &self.city, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.address, self.city, self.country)
    }
}

/// Amenity tags a host can attach to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Wifi,
    Kitchen,
    AirConditioning,
    Heating,
    Pool,
    FreeParking,
    Washer,
    Tv,
    Workspace,
    PetsAllowed,
}

impl Amenity {
    pub const ALL: [Amenity; 10] = [
        Amenity::Wifi,
        Amenity::Kitchen,
        Amenity::AirConditioning,
        Amenity::Heating,
        Amenity::Pool,
        Amenity::FreeParking,
        Amenity::Washer,
        Amenity::Tv,
        Amenity::Workspace,
        Amenity::PetsAllowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Wifi => "wifi",
            Amenity::Kitchen => "kitchen",
            Amenity::AirConditioning => "air_conditioning",
            Amenity::Heating => "heating",
            Amenity::Pool => "pool",
            Amenity::FreeParking => "free_parking",
            Amenity::Washer => "washer",
            Amenity::Tv => "tv",
            Amenity::Workspace => "workspace",
            Amenity::PetsAllowed => "pets_allowed",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Amenity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Amenity::ALL
            .into_iter()
            .find(|amenity| amenity.as_str() == normalized)
            .ok_or_else(|| format!("unknown amenity '{}'", s))
    }
}

/// A listable, bookable stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub location: Location,
    pub min_guests: u32,
    pub max_guests: u32,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    /// Username of the hosting account
    pub username: String,
}

impl Item {
    /// True if the listing can host exactly `guests` people.
    pub fn fits_guests(&self, guests: u32) -> bool {
        self.min_guests <= guests && guests <= self.max_guests
    }

    /// True if at least one of `wanted` is offered.
    pub fn has_any_amenity(&self, wanted: &[Amenity]) -> bool {
        wanted.iter().any(|amenity| self.amenities.contains(amenity))
    }
}

// =============================================================================
// Reservation Type
// =============================================================================

/// A priced availability period for one item.
///
/// Both prices are kept because a host may charge per stay or per person;
/// the price filter looks at them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub item_id: ItemId,
    pub price_by_accommodation: f64,
    pub price_by_people: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Reservation {
    /// True if the whole `[start, end]` range lies inside this period.
    pub fn covers(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= start && end <= self.end_date
    }
}

// =============================================================================
// User-related Types
// =============================================================================

/// Account role as reported by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Guest,
    Host,
    Anonymous,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "host" => Ok(Role::Host),
            "" | "anonymous" | "none" => Ok(Role::Anonymous),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub featured: bool,
}

// =============================================================================
// CatalogIndex - The In-Memory Store
// =============================================================================

/// Holds every listing, reservation, user and recommendation list.
///
/// Items keep their load order so full-catalog fetches are deterministic;
/// `item_positions` gives O(1) lookups by identifier.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    pub(crate) items: Vec<Item>,
    pub(crate) item_positions: HashMap<ItemId, usize>,

    /// Availability periods per item, in load order
    pub(crate) reservations: HashMap<ItemId, Vec<Reservation>>,

    pub(crate) users: HashMap<UserId, User>,
    pub(crate) usernames: HashMap<String, UserId>,

    /// Ranked recommended item ids per username
    pub(crate) recommendations: HashMap<String, Vec<ItemId>>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in load order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.item_positions.get(id).map(|&pos| &self.items[pos])
    }

    /// Reservations for an item; empty slice if it has none
    pub fn get_reservations(&self, item_id: &str) -> &[Reservation] {
        self.reservations
            .get(item_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<&User> {
        self.usernames
            .get(username)
            .and_then(|id| self.users.get(id))
    }

    /// Ranked recommendations for a user; empty slice if none
    pub fn get_recommendations(&self, username: &str) -> &[ItemId] {
        self.recommendations
            .get(username)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Insert an item. A repeated identifier replaces the earlier record in place.
    pub fn insert_item(&mut self, item: Item) {
        match self.item_positions.get(&item.id) {
            Some(&pos) => self.items[pos] = item,
            None => {
                self.item_positions.insert(item.id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn insert_reservation(&mut self, reservation: Reservation) {
        self.reservations
            .entry(reservation.item_id.clone())
            .or_default()
            .push(reservation);
    }

    pub fn insert_user(&mut self, user: User) {
        self.usernames.insert(user.username.clone(), user.id.clone());
        self.users.insert(user.id.clone(), user);
    }

    pub fn insert_recommendations(&mut self, username: impl Into<String>, ids: Vec<ItemId>) {
        self.recommendations.insert(username.into(), ids);
    }

    /// (items, reservations, users) for logging and validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_reservations = self.reservations.values().map(|v| v.len()).sum();
        (self.items.len(), total_reservations, self.users.len())
    }
}
