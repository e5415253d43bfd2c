//! Collection filtering for list views.
//!
//! A [`Criteria`] narrows a collection in two ways:
//!
//! - **Search**: the search text must appear, case-insensitively, in at least
//!   one of the record's search fields. An empty search matches everything.
//!   The text is used as given; callers trim it if they want trimming.
//! - **Constraints**: every `key = value` pair must equal the record's
//!   attribute of that name exactly.
//!
//! Filtering never mutates its input and always preserves the relative order
//! of the records it keeps.
//!
//! # Examples
//!
//! ```rust
//! use posboard::filter::{filter, Criteria, Filterable};
//!
//! #[derive(Clone)]
//! struct Row { name: String, status: &'static str }
//!
//! impl Filterable for Row {
//!     fn search_fields(&self) -> Vec<&str> { vec![&self.name] }
//!     fn attribute(&self, key: &str) -> Option<&str> {
//!         (key == "status").then_some(self.status)
//!     }
//! }
//!
//! let rows = vec![
//!     Row { name: "Customer 1".into(), status: "active" },
//!     Row { name: "Customer 2".into(), status: "inactive" },
//! ];
//!
//! let criteria = Criteria::search("CUST").with_constraint("status", "active");
//! let hits = filter(&rows, &criteria);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Customer 1");
//! ```

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Implemented by records that can be searched and constrained.
pub trait Filterable {
    /// The text fields the search string is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Looks up an attribute used by equality constraints, such as
    /// `"status"` or `"category"`. Unknown keys return `None`, which never
    /// satisfies a constraint.
    fn attribute(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// How the search text is compared with each field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match: the search characters must appear in order.
    Fuzzy,
}

/// Search text plus equality constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Text searched for in every search field.
    pub search: String,
    /// Attribute name to required value.
    pub constraints: BTreeMap<String, String>,
    /// Comparison used for the search text.
    pub mode: MatchMode,
}

impl Criteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria with only a search string.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }

    /// Adds (or replaces) an equality constraint.
    pub fn with_constraint(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.insert(key.into(), value.into());
        self
    }

    /// Switches the search comparison.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// True when these criteria match every record.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.constraints.is_empty()
    }

    /// Tests a single record.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        let constraints_hold = self
            .constraints
            .iter()
            .all(|(key, want)| item.attribute(key) == Some(want.as_str()));
        if !constraints_hold {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        match self.mode {
            MatchMode::Substring => {
                let needle = fold_needle(&self.search);
                item.search_fields()
                    .iter()
                    .any(|field| find_folded(field, &needle).is_some())
            }
            MatchMode::Fuzzy => {
                let matcher = SkimMatcherV2::default().ignore_case();
                item.search_fields()
                    .iter()
                    .any(|field| matcher.fuzzy_match(field, &self.search).is_some())
            }
        }
    }
}

impl Criteria {
    /// Character positions in `text` that the search text matched, for
    /// highlighting. Empty when there is no search or no match.
    pub fn match_positions(&self, text: &str) -> Vec<usize> {
        if self.search.is_empty() {
            return Vec::new();
        }
        match self.mode {
            MatchMode::Substring => {
                find_folded(text, &fold_needle(&self.search)).unwrap_or_default()
            }
            MatchMode::Fuzzy => SkimMatcherV2::default()
                .ignore_case()
                .fuzzy_indices(text, &self.search)
                .map(|(_, indices)| indices)
                .unwrap_or_default(),
        }
    }
}

fn fold_needle(search: &str) -> Vec<char> {
    search.chars().flat_map(char::to_lowercase).collect()
}

// Case-insensitive search for `needle` (already folded) in `text`. Returns the
// indices of the original chars covered by the first occurrence. A char whose
// lowercase form is longer than one char covers all of its folded chars.
fn find_folded(text: &str, needle: &[char]) -> Option<Vec<usize>> {
    if needle.is_empty() {
        return Some(Vec::new());
    }
    let hay: Vec<(char, usize)> = text
        .chars()
        .enumerate()
        .flat_map(|(i, c)| c.to_lowercase().map(move |lower| (lower, i)))
        .collect();
    let start = hay.windows(needle.len()).position(|window| {
        window
            .iter()
            .map(|&(c, _)| c)
            .eq(needle.iter().copied())
    })?;
    let mut positions: Vec<usize> = hay[start..start + needle.len()]
        .iter()
        .map(|&(_, i)| i)
        .collect();
    positions.dedup();
    Some(positions)
}

/// Returns the positions of matching records, in collection order.
pub fn filter_indices<T: Filterable>(items: &[T], criteria: &Criteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..items.len()).collect();
    }
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| criteria.matches(*item))
        .map(|(index, _)| index)
        .collect()
}

/// Returns clones of the matching records, in collection order.
pub fn filter<T: Filterable + Clone>(items: &[T], criteria: &Criteria) -> Vec<T> {
    filter_indices(items, criteria)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        email: String,
        phone: String,
        status: &'static str,
    }

    impl Filterable for Person {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name, &self.email, &self.phone]
        }

        fn attribute(&self, key: &str) -> Option<&str> {
            match key {
                "status" => Some(self.status),
                _ => None,
            }
        }
    }

    fn people(n: usize) -> Vec<Person> {
        (1..=n)
            .map(|i| Person {
                name: format!("Customer {}", i),
                email: format!("customer{}@example.com", i),
                phone: format!("08{:08}", i * 7),
                status: if i % 5 == 0 { "inactive" } else { "active" },
            })
            .collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let all = people(25);
        assert_eq!(filter(&all, &Criteria::new()), all);
    }

    #[test]
    fn test_search_is_case_insensitive_over_any_field() {
        let all = people(25);
        assert_eq!(filter(&all, &Criteria::search("cust")).len(), 25);
        assert_eq!(filter(&all, &Criteria::search("CUSTOMER12@")).len(), 1);
        assert_eq!(filter(&all, &Criteria::search("xyz")), Vec::<Person>::new());
    }

    #[test]
    fn test_whitespace_search_is_literal() {
        let all = people(3);
        // every name contains a space
        assert_eq!(filter(&all, &Criteria::search(" ")).len(), 3);
        assert!(filter(&all, &Criteria::search("  ")).is_empty());
    }

    #[test]
    fn test_constraints_and_search_combine() {
        let all = people(25);
        let inactive = Criteria::new().with_constraint("status", "inactive");
        assert_eq!(filter(&all, &inactive).len(), 5);

        let both = Criteria::search("customer2").with_constraint("status", "inactive");
        let hits = filter(&all, &both);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Customer 20");
        assert_eq!(hits[1].name, "Customer 25");
    }

    #[test]
    fn test_unknown_attribute_never_matches() {
        let all = people(4);
        let c = Criteria::new().with_constraint("category", "drinks");
        assert!(filter(&all, &c).is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let all = people(30);
        let idx = filter_indices(&all, &Criteria::search("1"));
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
        assert!(idx.iter().all(|&i| all[i].name.contains('1')
            || all[i].email.contains('1')
            || all[i].phone.contains('1')));
    }

    #[test]
    fn test_match_positions() {
        let c = Criteria::search("TOM");
        assert_eq!(c.match_positions("Customer 7"), vec![3, 4, 5]);
        assert!(c.match_positions("Table A1").is_empty());
        assert!(Criteria::new().match_positions("anything").is_empty());

        let fuzzy = Criteria::search("cr7").with_mode(MatchMode::Fuzzy);
        assert_eq!(fuzzy.match_positions("Customer 7").len(), 3);
    }

    #[test]
    fn test_match_and_highlight_fold_the_same_way() {
        // 'İ' lowercases to "i\u{307}", two chars
        let guest = Person {
            name: "İzmir Branch".into(),
            email: String::new(),
            phone: String::new(),
            status: "active",
        };
        let c = Criteria::search("i\u{307}z");
        assert!(c.matches(&guest));
        assert_eq!(c.match_positions(&guest.name), vec![0, 1]);

        let c = Criteria::search("BRANCH");
        assert!(c.matches(&guest));
        assert_eq!(c.match_positions(&guest.name), vec![6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_fuzzy_mode_matches_in_order_characters() {
        let all = people(3);
        let c = Criteria::search("cst2").with_mode(MatchMode::Fuzzy);
        let hits = filter(&all, &c);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Customer 2");
    }
}
