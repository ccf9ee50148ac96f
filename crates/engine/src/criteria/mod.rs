//! Filter criterion implementations.
//!
//! This module contains the three criteria the filter engine combines:
//! - PriceRangeCriterion: at least one reservation inside the price bounds
//! - AmenitiesCriterion: shares an amenity with the requested set
//! - FeaturedHostCriterion: owned by a featured host

pub mod amenities;
pub mod featured_host;
pub mod price;

pub use amenities::AmenitiesCriterion;
pub use featured_host::FeaturedHostCriterion;
pub use price::PriceRangeCriterion;
