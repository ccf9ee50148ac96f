//! Parser for catalog fixture files.
//!
//! A catalog directory holds four JSON documents:
//! - items.json: array of `Item`
//! - reservations.json: array of `Reservation`
//! - users.json: array of `User`
//! - recommendations.json: object mapping username to ranked item ids (optional)

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(err),
    })
}

/// Deserialize one JSON document, tagging errors with the source name
fn parse_json<T: DeserializeOwned>(reader: impl Read, source: &str) -> Result<T> {
    serde_json::from_reader(reader).map_err(|err| CatalogError::ParseError {
        file: source.to_string(),
        reason: err.to_string(),
    })
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(open(path)?);
    parse_json(reader, &path.display().to_string())
}

pub fn parse_items(path: &Path) -> Result<Vec<Item>> {
    parse_file(path)
}

pub fn parse_reservations(path: &Path) -> Result<Vec<Reservation>> {
    parse_file(path)
}

pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    parse_file(path)
}

/// Recommendations are optional; a missing file means nobody has any.
pub fn parse_recommendations(path: &Path) -> Result<HashMap<String, Vec<ItemId>>> {
    match parse_file(path) {
        Err(CatalogError::FileNotFound { .. }) => Ok(HashMap::new()),
        other => other,
    }
}

/// Parse items from an in-memory JSON string
pub fn parse_items_str(json: &str) -> Result<Vec<Item>> {
    parse_json(json.as_bytes(), "<inline items>")
}

/// Parse reservations from an in-memory JSON string
pub fn parse_reservations_str(json: &str) -> Result<Vec<Reservation>> {
    parse_json(json.as_bytes(), "<inline reservations>")
}
