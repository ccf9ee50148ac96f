//! CatalogIndex loading and validation.
//!
//! Builds the index from a fixture directory:
//! - parse the four files in parallel
//! - insert items, reservations, users, recommendations
//! - validate identifiers and references

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl CatalogIndex {
    /// Load a catalog from a directory of JSON fixtures.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let items_path = data_dir.join("items.json");
        let reservations_path = data_dir.join("reservations.json");
        let users_path = data_dir.join("users.json");
        let recommendations_path = data_dir.join("recommendations.json");

        // Nested joins give four-way parallelism
        let ((items, reservations), (users, recommendations)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_items(&items_path),
                    || parser::parse_reservations(&reservations_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_users(&users_path),
                    || parser::parse_recommendations(&recommendations_path),
                )
            },
        );

        let items = items?;
        let reservations = reservations?;
        let users = users?;
        let recommendations = recommendations?;

        // Check before inserting: insert_item folds repeats together
        check_unique_ids(&items)?;

        let mut index = CatalogIndex::new();
        for item in items {
            index.insert_item(item);
        }
        for reservation in reservations {
            index.insert_reservation(reservation);
        }
        for user in users {
            index.insert_user(user);
        }
        for (username, ids) in recommendations {
            index.insert_recommendations(username, ids);
        }

        index.validate()?;

        let (items, reservations, users) = index.counts();
        info!(
            "Catalog loaded: {} items, {} reservations, {} users",
            items, reservations, users
        );
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Checks that:
    /// - every item has `min_guests <= max_guests`
    /// - every reservation references a known item
    /// - reservation periods are ordered and prices non-negative
    pub fn validate(&self) -> Result<()> {
        for item in &self.items {
            if item.min_guests > item.max_guests {
                return Err(CatalogError::InvalidValue {
                    field: format!("guests of item {}", item.id),
                    value: format!("{}..{}", item.min_guests, item.max_guests),
                });
            }
        }

        for (item_id, reservations) in &self.reservations {
            if !self.item_positions.contains_key(item_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Item".to_string(),
                    id: item_id.clone(),
                });
            }
            for reservation in reservations {
                if reservation.start_date > reservation.end_date {
                    return Err(CatalogError::InvalidValue {
                        field: format!("dates of reservation {}", reservation.id),
                        value: format!("{}..{}", reservation.start_date, reservation.end_date),
                    });
                }
                if reservation.price_by_accommodation < 0.0 || reservation.price_by_people < 0.0 {
                    return Err(CatalogError::InvalidValue {
                        field: format!("price of reservation {}", reservation.id),
                        value: format!(
                            "{}/{}",
                            reservation.price_by_accommodation, reservation.price_by_people
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_unique_ids(items: &[Item]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                entity: "Item".to_string(),
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}
