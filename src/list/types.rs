//! Core traits and message types for list views.
//!
//! - [`Record`]: a displayable, filterable row with a unique id
//! - [`NextId`]: how a fresh id is chosen when a record is added
//! - [`Draft`] and [`Patch`]: the inputs of `add_item` and `update_item`
//! - [`ItemDelegate`]: row rendering
//! - [`LoadedMsg`] and [`ScrollToTopMsg`]: messages exchanged with the runtime

use crate::error::{FetchError, ValidationError};
use crate::filter::Filterable;
use crate::source::LoadTicket;
use bubbletea_rs::Cmd;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row managed by a list view.
///
/// Ids are unique within a collection at any point in time; the list view
/// enforces this on every mutation.
///
/// # Examples
///
/// ```rust
/// use posboard::filter::Filterable;
/// use posboard::list::Record;
/// use std::fmt;
///
/// #[derive(Debug, Clone)]
/// struct Table { id: u32, number: String, status: String }
///
/// impl fmt::Display for Table {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "Table {}", self.number)
///     }
/// }
///
/// impl Filterable for Table {
///     fn search_fields(&self) -> Vec<&str> { vec![&self.number] }
///     fn attribute(&self, key: &str) -> Option<&str> {
///         (key == "status").then_some(self.status.as_str())
///     }
/// }
///
/// impl Record for Table {
///     type Id = u32;
///     fn id(&self) -> &u32 { &self.id }
///     fn status(&self) -> Option<&str> { Some(&self.status) }
/// }
/// ```
pub trait Record: Filterable + Display + Clone + Send + Sync + 'static {
    /// Identifier type, numeric or string.
    type Id: Clone + Eq + Hash + Debug + Display + NextId + Send + Sync + 'static;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Status used for the aggregate counts, if the record has one.
    fn status(&self) -> Option<&str> {
        None
    }
}

/// Picks an identifier that is not already taken.
pub trait NextId: Sized {
    /// Returns a fresh id given the ids currently in the collection.
    fn next_id(existing: &HashSet<&Self>) -> Self;
}

macro_rules! numeric_next_id {
    ($($t:ty),*) => {
        $(
            impl NextId for $t {
                /// `max(existing) + 1`, or 1 for an empty collection. When the
                /// maximum is already taken, the smallest unused id, positive first.
                fn next_id(existing: &HashSet<&Self>) -> Self {
                    match existing.iter().map(|id| **id).max() {
                        None => 1,
                        Some(max) => max.checked_add(1).unwrap_or_else(|| {
                            (1..<$t>::MAX)
                                .chain(<$t>::MIN..1)
                                .find(|id| !existing.contains(&id))
                                .unwrap_or(max)
                        }),
                    }
                }
            }
        )*
    };
}

numeric_next_id!(u32, u64, usize, i32, i64);

impl NextId for String {
    /// A fresh UUID v4, drawn again on the (unlikely) collision.
    fn next_id(existing: &HashSet<&Self>) -> Self {
        loop {
            let candidate = uuid::Uuid::new_v4().to_string();
            if !existing.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// User input for a new record, before it has an id.
pub trait Draft<R: Record> {
    /// Checks required fields. An error leaves the collection untouched.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Builds the record with its assigned id.
    fn into_record(self, id: R::Id) -> R;
}

/// A change merged into an existing record.
///
/// Any `FnOnce(&mut R)` is a patch, so ad hoc edits can be written inline.
pub trait Patch<R> {
    /// Merges the change into `record`.
    fn apply(self, record: &mut R);
}

impl<R, F: FnOnce(&mut R)> Patch<R> for F {
    fn apply(self, record: &mut R) {
        self(record)
    }
}

/// Where `add_item` places new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Newest first (customers).
    Front,
    /// Newest last.
    #[default]
    Back,
}

/// Whether the user is typing a search or one is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    /// No search or constraint.
    #[default]
    Unfiltered,
    /// The search line has focus; every keystroke refilters.
    Filtering,
    /// Criteria are in effect.
    FilterApplied,
}

/// Counts over the whole (unfiltered) collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of records.
    pub total: usize,
    /// Number of records per status.
    pub by_status: BTreeMap<String, usize>,
}

impl Stats {
    /// Computes the counts for a collection.
    pub fn from_items<T: Record>(items: &[T]) -> Self {
        let mut by_status = BTreeMap::new();
        for status in items.iter().filter_map(Record::status) {
            *by_status.entry(status.to_string()).or_insert(0) += 1;
        }
        Self {
            total: items.len(),
            by_status,
        }
    }

    /// Records with `status`, 0 if none.
    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}

/// Renders rows of a list view.
pub trait ItemDelegate<T: Record>: Send + Sync {
    /// Renders the record at `position` in the filtered collection.
    fn render(&self, view: &super::ListView<T>, position: usize, item: &T) -> String;

    /// Blank lines between rows.
    fn spacing(&self) -> usize {
        0
    }

    /// Called when the user presses enter on a row.
    fn on_select(&self, _position: usize, _item: &T) -> Option<Cmd> {
        None
    }
}

/// Result of a view's fetch. Applied only if `ticket` is still current.
#[derive(Debug, Clone)]
pub struct LoadedMsg<T> {
    /// The fetch this answers.
    pub ticket: LoadTicket,
    /// Fetched snapshot or the failure.
    pub result: Result<Vec<T>, FetchError>,
}

/// Emitted whenever navigation changes the page; the embedding screen
/// scrolls its container back to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToTopMsg {
    /// The view whose page changed.
    pub view_id: u64,
    /// The new page.
    pub page: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_next_id() {
        let ids = [3u32, 9, 4];
        let existing: HashSet<&u32> = ids.iter().collect();
        assert_eq!(u32::next_id(&existing), 10);
        assert_eq!(u64::next_id(&HashSet::new()), 1);
    }

    #[test]
    fn test_numeric_next_id_at_type_maximum() {
        let ids = [1i32, 2, 4, i32::MAX];
        let existing: HashSet<&i32> = ids.iter().collect();
        assert_eq!(i32::next_id(&existing), 3);
    }

    #[test]
    fn test_string_next_id_is_uuid() {
        let taken = "x".to_string();
        let existing: HashSet<&String> = [&taken].into_iter().collect();
        let id = String::next_id(&existing);
        assert_ne!(id, taken);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_closure_is_a_patch() {
        let mut n = 1;
        (|v: &mut i32| *v += 41).apply(&mut n);
        assert_eq!(n, 42);
    }
}
