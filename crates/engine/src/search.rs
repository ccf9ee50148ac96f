//! Search cycle over location, guest count and date availability.
//!
//! The three lookups are joined, then the cardinality pattern of the
//! resulting sets picks a rule from [`SEARCH_RULES`]. A criterion counts as
//! engaged when its set is non-empty, so a requested criterion that matched
//! nothing behaves like one that was never asked for.

use crate::combine::{apply_plan, select_rule, Plan, Rule, SLOTS};
use crate::error::EngineError;
use crate::notice::{Notice, NO_DATE_MATCHES, NO_GUEST_MATCHES, NO_LOCATION_MATCHES};
use catalog::Item;
use sources::{SourceResult, Sources};
use std::time::Instant;
use tracing::{debug, info, instrument};

const LOCATION: usize = 0;
const GUESTS: usize = 1;
const DATES: usize = 2;

/// Search combination rules, first match wins.
pub const SEARCH_RULES: [Rule; 8] = [
    Rule::new("location only", [true, false, false], Plan::Single(LOCATION)),
    Rule::new("location, guests and dates", [true, true, true], Plan::All),
    Rule::new("dates only", [false, false, true], Plan::Single(DATES)),
    Rule::new("guests only", [false, true, false], Plan::Single(GUESTS)),
    Rule::new("location and guests", [true, true, false], Plan::Pair(LOCATION, GUESTS)),
    Rule::new("location and dates", [true, false, true], Plan::Pair(LOCATION, DATES)),
    Rule::new("dates and guests", [false, true, true], Plan::Pair(GUESTS, DATES)),
    Rule::new("nothing", [false, false, false], Plan::Inactive),
];

/// Raw search form input. Every field is text, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub guests: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    pub fn with_guests(mut self, guests: impl Into<String>) -> Self {
        self.guests = Some(guests.into());
        self
    }

    /// Which lookups this query triggers.
    ///
    /// Location and guests are skipped when missing or empty. The date
    /// lookup is skipped only when a bound is missing: an empty bound is
    /// still sent and rejected by the collaborator.
    pub fn criteria(&self) -> SearchCriteria {
        fn engaged(field: &Option<String>) -> bool {
            matches!(field.as_deref(), Some(text) if !text.is_empty())
        }

        SearchCriteria {
            location: engaged(&self.location),
            guests: engaged(&self.guests),
            dates: self.start_date.is_some() && self.end_date.is_some(),
        }
    }
}

/// Lookups requested in one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub location: bool,
    pub guests: bool,
    pub dates: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// Replace the visible catalog with these items
    Items(Vec<Item>),
    /// Nothing engaged: reload the full catalog
    ShowAll,
}

/// Everything one search cycle produced
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub criteria: SearchCriteria,
    pub rule: &'static str,
    pub notices: Vec<Notice>,
    pub result: SearchResult,
}

/// How one lookup ended
enum Resolution {
    Skipped,
    Found(Vec<Item>),
    /// The collaborator answered with an empty body
    NoContent,
}

impl Resolution {
    fn into_set(self) -> Vec<Item> {
        match self {
            Resolution::Found(items) => items,
            Resolution::Skipped | Resolution::NoContent => Vec::new(),
        }
    }
}

impl From<Option<Vec<Item>>> for Resolution {
    fn from(body: Option<Vec<Item>>) -> Self {
        match body {
            Some(items) => Resolution::Found(items),
            None => Resolution::NoContent,
        }
    }
}

pub struct SearchEngine {
    sources: Sources,
}

impl SearchEngine {
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }

    /// Run one search cycle.
    ///
    /// ## Algorithm
    /// 1. Fire the engaged lookups concurrently and join all three
    /// 2. Fail the cycle if any lookup errored
    /// 3. Report every empty-bodied lookup; the cycle result is provisionally
    ///    empty
    /// 4. Pick the rule matching which sets are non-empty and apply it
    ///
    /// # Returns
    /// * `Ok(SearchOutcome)` - The rule applied and the resulting catalog
    /// * `Err(EngineError::Lookup)` - A lookup failed; nothing should change
    #[instrument(skip(self))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, EngineError> {
        let start = Instant::now();
        let criteria = query.criteria();
        let catalog = &self.sources.catalog;

        let location = async {
            match query.location.as_deref() {
                Some(text) if criteria.location => {
                    catalog.fetch_by_location(text).await.map(Resolution::from)
                }
                _ => SourceResult::Ok(Resolution::Skipped),
            }
        };
        let guests = async {
            match query.guests.as_deref() {
                Some(text) if criteria.guests => {
                    catalog.fetch_by_guest_count(text).await.map(Resolution::from)
                }
                _ => SourceResult::Ok(Resolution::Skipped),
            }
        };
        let dates = async {
            match (query.start_date.as_deref(), query.end_date.as_deref()) {
                (Some(from), Some(to)) => {
                    catalog.fetch_by_date_range(from, to).await.map(Resolution::from)
                }
                _ => SourceResult::Ok(Resolution::Skipped),
            }
        };

        let (location, guests, dates) = tokio::join!(location, guests, dates);

        let resolutions = [
            location.map_err(|source| EngineError::Lookup {
                criterion: "location",
                source,
            })?,
            guests.map_err(|source| EngineError::Lookup {
                criterion: "guests",
                source,
            })?,
            dates.map_err(|source| EngineError::Lookup {
                criterion: "dates",
                source,
            })?,
        ];

        let messages = [NO_LOCATION_MATCHES, NO_GUEST_MATCHES, NO_DATE_MATCHES];
        let notices: Vec<Notice> = resolutions
            .iter()
            .zip(messages)
            .filter(|(resolution, _)| matches!(resolution, Resolution::NoContent))
            .map(|(_, message)| Notice::info(message))
            .collect();

        let [location, guests, dates] = resolutions.map(Resolution::into_set);
        debug!(
            "candidate sets: location={}, guests={}, dates={}",
            location.len(),
            guests.len(),
            dates.len()
        );

        let active: [bool; SLOTS] = [!location.is_empty(), !guests.is_empty(), !dates.is_empty()];
        let rule = select_rule(&SEARCH_RULES, active)
            .copied()
            .unwrap_or(Rule::new("unmatched", active, Plan::Inactive));

        let result = match apply_plan([&location, &guests, &dates], rule.plan) {
            Some(items) => SearchResult::Items(items),
            None if !notices.is_empty() => SearchResult::Items(Vec::new()),
            None => SearchResult::ShowAll,
        };

        info!(
            "search applied '{}' in {:?} ({})",
            rule.name,
            start.elapsed(),
            match &result {
                SearchResult::Items(items) => format!("{} items", items.len()),
                SearchResult::ShowAll => "show all".to_string(),
            }
        );

        Ok(SearchOutcome {
            criteria,
            rule: rule.name,
            notices,
            result,
        })
    }
}
