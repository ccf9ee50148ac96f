//! Combination of three candidate sets.
//!
//! Both engines resolve exactly three criteria and then pick a rule from an
//! ordered table based on which criteria are active. The rule says whether
//! the result is one set as-is, an intersection of two or three sets, or
//! nothing at all (the caller decides what "nothing" means: show the full
//! catalog, or leave the catalog untouched).
//!
//! ## Intersection semantics
//! Intersection is by identifier only. The result follows the order of the
//! lowest-slot active set and keeps that set's copy of each item. An item
//! appearing `a`, `b` and `c` times in the three sets appears `a * b * c`
//! times in the result, which is exactly what the nested-loop formulation
//! produces; no deduplication happens here.

use catalog::Item;
use std::collections::HashMap;

/// Slot count shared by both engines
pub const SLOTS: usize = 3;

/// Which sets a rule combines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Take one set unchanged
    Single(usize),
    /// Intersect two sets; the first index drives order
    Pair(usize, usize),
    /// Intersect all three sets; slot 0 drives order
    All,
    /// No criterion active
    Inactive,
}

/// One row of a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: [bool; SLOTS],
    pub plan: Plan,
}

impl Rule {
    pub const fn new(name: &'static str, pattern: [bool; SLOTS], plan: Plan) -> Self {
        Self {
            name,
            pattern,
            plan,
        }
    }
}

/// First rule whose pattern equals `active`, in table order
pub fn select_rule(rules: &[Rule], active: [bool; SLOTS]) -> Option<&Rule> {
    rules.iter().find(|rule| rule.pattern == active)
}

/// Apply a plan to the three sets. `None` means no criterion was active.
pub fn apply_plan(sets: [&[Item]; SLOTS], plan: Plan) -> Option<Vec<Item>> {
    match plan {
        Plan::Single(slot) => Some(sets[slot].to_vec()),
        Plan::Pair(first, second) => Some(intersect_by_id(sets[first], &[sets[second]])),
        Plan::All => Some(intersect_by_id(sets[0], &[sets[1], sets[2]])),
        Plan::Inactive => None,
    }
}

/// Items of `primary` whose identifier is present in every one of `others`.
///
/// Runs in O(n + m) using per-set identifier counts. Output order and
/// multiplicity match iterating `primary` in the outer loop and every other
/// set in nested inner loops.
pub fn intersect_by_id(primary: &[Item], others: &[&[Item]]) -> Vec<Item> {
    let counts: Vec<HashMap<&str, usize>> = others
        .iter()
        .map(|set| {
            let mut counts: HashMap<&str, usize> = HashMap::with_capacity(set.len());
            for item in set.iter() {
                *counts.entry(item.id.as_str()).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let mut result = Vec::new();
    for item in primary {
        let times: usize = counts
            .iter()
            .map(|set| set.get(item.id.as_str()).copied().unwrap_or(0))
            .product();
        for _ in 0..times {
            result.push(item.clone());
        }
    }
    result
}
