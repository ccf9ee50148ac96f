//! User-facing messages produced by a cycle.

use std::fmt;

pub const NO_LOCATION_MATCHES: &str = "No accommodations with that location have been found";
pub const NO_DATE_MATCHES: &str = "No accommodations with those reservation dates have been found";
pub const NO_GUEST_MATCHES: &str = "No accommodations with that number of guests have been found";
pub const NO_PRICE_MATCHES: &str = "No accommodations in that price range have been found";
pub const NO_AMENITY_MATCHES: &str = "No accommodations with those amenities have been found";
pub const NO_FEATURED_MATCHES: &str = "No accommodations with featured hosts have been found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// A criterion resolved but matched nothing
    Info,
    /// A collaborator call failed
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "info: {}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}
