//! # Catalog Crate
//!
//! Domain types and the in-memory store for listings.
//!
//! ## Main Components
//!
//! - **types**: Item, Location, Amenity, Reservation, User, Role, CatalogIndex
//! - **parser**: Parse JSON fixture files into Rust structs
//! - **index**: Load a fixture directory into a validated CatalogIndex
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_dir(Path::new("data/sample"))?;
//! let item = index.get_item("paris-loft").unwrap();
//! let periods = index.get_reservations(&item.id);
//!
//! println!("{} has {} availability periods", item.name, periods.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    ItemId,
    UserId,
    // Core types
    Item,
    Location,
    Reservation,
    User,
    CatalogIndex,
    // Enums
    Amenity,
    Role,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn paris_loft() -> Item {
        Item {
            id: "paris-loft".to_string(),
            name: "Loft in the Marais".to_string(),
            location: Location {
                country: "France".to_string(),
                city: "Paris".to_string(),
                address: "Rue des Archives 8".to_string(),
            },
            min_guests: 1,
            max_guests: 4,
            amenities: vec![Amenity::Wifi, Amenity::Kitchen],
            username: "marie".to_string(),
        }
    }

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        assert_eq!(index.counts(), (0, 0, 0));
    }

    #[test]
    fn test_insert_item() {
        let mut index = CatalogIndex::new();
        index.insert_item(paris_loft());

        let retrieved = index.get_item("paris-loft").unwrap();
        assert_eq!(retrieved.location.city, "Paris");
        assert_eq!(index.items().len(), 1);
    }

    #[test]
    fn test_reinserting_item_replaces_in_place() {
        let mut index = CatalogIndex::new();
        index.insert_item(paris_loft());

        let mut other = paris_loft();
        other.id = "lyon-flat".to_string();
        index.insert_item(other);

        let mut renamed = paris_loft();
        renamed.name = "Renamed loft".to_string();
        index.insert_item(renamed);

        assert_eq!(index.items().len(), 2);
        assert_eq!(index.items()[0].name, "Renamed loft");
        assert_eq!(index.items()[1].id, "lyon-flat");
    }

    #[test]
    fn test_insert_reservation_and_user() {
        let mut index = CatalogIndex::new();
        index.insert_item(paris_loft());
        index.insert_reservation(Reservation {
            id: "r1".to_string(),
            item_id: "paris-loft".to_string(),
            price_by_accommodation: 120.0,
            price_by_people: 35.0,
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        });
        index.insert_user(User {
            id: "u1".to_string(),
            username: "marie".to_string(),
            role: Role::Host,
            featured: true,
        });

        assert_eq!(index.get_reservations("paris-loft").len(), 1);
        assert_eq!(index.get_user_by_username("marie").unwrap().id, "u1");
        assert!(index.get_user("u1").unwrap().featured);
        assert_eq!(index.counts(), (1, 1, 1));
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();

        assert!(index.get_item("nope").is_none());
        assert!(index.get_user("nope").is_none());
        assert!(index.get_user_by_username("nope").is_none());
        assert!(index.get_reservations("nope").is_empty());
        assert!(index.get_recommendations("nope").is_empty());
    }

    #[test]
    fn test_location_matching() {
        let loft = paris_loft();
        assert!(loft.location.matches("paris"));
        assert!(loft.location.matches("  FRANCE "));
        assert!(loft.location.matches("archives"));
        assert!(!loft.location.matches("Lyon"));
        assert!(!loft.location.matches(""));
    }

    #[test]
    fn test_guest_bounds_and_amenities() {
        let loft = paris_loft();
        assert!(loft.fits_guests(1));
        assert!(loft.fits_guests(4));
        assert!(!loft.fits_guests(5));
        assert!(loft.has_any_amenity(&[Amenity::Pool, Amenity::Wifi]));
        assert!(!loft.has_any_amenity(&[Amenity::Pool]));
        assert!(!loft.has_any_amenity(&[]));
    }

    #[test]
    fn test_role_and_amenity_parsing() {
        assert_eq!("GUEST".parse::<Role>().unwrap(), Role::Guest);
        assert_eq!("guest".parse::<Role>().unwrap(), Role::Guest);
        assert_eq!("".parse::<Role>().unwrap(), Role::Anonymous);
        assert!("admin".parse::<Role>().is_err());

        assert_eq!("WiFi".parse::<Amenity>().unwrap(), Amenity::Wifi);
        assert_eq!(
            "air conditioning".parse::<Amenity>().unwrap(),
            Amenity::AirConditioning
        );
        assert!("sauna".parse::<Amenity>().is_err());
    }
}
