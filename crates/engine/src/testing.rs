//! Shared fixtures for unit tests.

use catalog::{Amenity, CatalogIndex, Item, Location, Reservation, Role, User};
use chrono::NaiveDate;
use sources::{InMemorySource, Sources};
use std::sync::Arc;

pub fn item(id: &str, city: &str, guests: (u32, u32), amenities: &[Amenity], host: &str) -> Item {
    Item {
        id: id.to_string(),
        name: format!("Stay {}", id),
        location: Location {
            country: "Somewhere".to_string(),
            city: city.to_string(),
            address: format!("Street {}", id),
        },
        min_guests: guests.0,
        max_guests: guests.1,
        amenities: amenities.to_vec(),
        username: host.to_string(),
    }
}

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

pub fn reservation(item_id: &str, accommodation: f64, people: f64, from: &str, to: &str) -> Reservation {
    Reservation {
        id: format!("r-{}", item_id),
        item_id: item_id.to_string(),
        price_by_accommodation: accommodation,
        price_by_people: people,
        start_date: date(from),
        end_date: date(to),
    }
}

fn user(id: &str, username: &str, role: Role, featured: bool) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        role,
        featured,
    }
}

/// Four stays, two in Paris, with one reservation each.
///
/// | id | city     | guests | amenities     | host  | price (acc/people) |
/// |----|----------|--------|---------------|-------|--------------------|
/// | 1  | Paris    | 1-4    | wifi, pool    | marie*| 150 / 40           |
/// | 2  | Paris    | 1-2    | pool          | luc   | 50 / 60            |
/// | 3  | Belgrade | 2-6    | wifi, kitchen | jovan*| 100 / 20           |
/// | 4  | Lisbon   | 1-2    | -             | ines  | 300 / 200          |
///
/// `*` featured host. Guest `ana` is recommended `["4", "1"]`.
pub fn create_test_index() -> CatalogIndex {
    let mut index = CatalogIndex::new();

    index.insert_item(item("1", "Paris", (1, 4), &[Amenity::Wifi, Amenity::Pool], "marie"));
    index.insert_item(item("2", "Paris", (1, 2), &[Amenity::Pool], "luc"));
    index.insert_item(item("3", "Belgrade", (2, 6), &[Amenity::Wifi, Amenity::Kitchen], "jovan"));
    index.insert_item(item("4", "Lisbon", (1, 2), &[], "ines"));

    index.insert_reservation(reservation("1", 150.0, 40.0, "2024-06-01", "2024-06-30"));
    index.insert_reservation(reservation("2", 50.0, 60.0, "2024-07-01", "2024-07-31"));
    index.insert_reservation(reservation("3", 100.0, 20.0, "2024-06-01", "2024-09-30"));
    index.insert_reservation(reservation("4", 300.0, 200.0, "2024-08-01", "2024-08-31"));

    index.insert_user(user("u1", "marie", Role::Host, true));
    index.insert_user(user("u2", "luc", Role::Host, false));
    index.insert_user(user("u3", "jovan", Role::Host, true));
    index.insert_user(user("u4", "ines", Role::Host, false));
    index.insert_user(user("u5", "ana", Role::Guest, false));

    index.insert_recommendations("ana", vec!["4".to_string(), "1".to_string()]);

    index
}

pub fn create_test_sources() -> Sources {
    Sources::from_shared(Arc::new(InMemorySource::new(Arc::new(create_test_index()))))
}

pub fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}
