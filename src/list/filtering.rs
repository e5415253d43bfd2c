//! Criteria changes on a list view.
//!
//! Any real change of criteria sends the view back to page 1. Setting the
//! criteria it already has is a no-op and leaves the page where it is.

use super::types::{FilterState, Record};
use super::ListView;
use crate::filter::{Criteria, MatchMode};

impl<T: Record> ListView<T> {
    /// Replaces the criteria.
    ///
    /// Returns false (and changes nothing) if `criteria` equals the active
    /// criteria.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use posboard::filter::Criteria;
    /// use posboard::list::ListView;
    /// use posboard::mock::MockGenerator;
    ///
    /// let mut view = ListView::new(MockGenerator::seeded(3).customers(25), 10);
    /// view.last_page();
    ///
    /// assert!(view.set_filter(Criteria::search("customer1")));
    /// assert_eq!(view.page(), 1);
    ///
    /// view.next_page();
    /// assert!(!view.set_filter(Criteria::search("customer1")));
    /// assert_eq!(view.page(), 2);
    /// ```
    pub fn set_filter(&mut self, criteria: Criteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        tracing::debug!(
            search = %criteria.search,
            constraints = criteria.constraints.len(),
            "filter changed"
        );
        self.query = criteria.search.clone();
        self.criteria = criteria;
        if self.filter_state != FilterState::Filtering {
            self.filter_state = if self.criteria.is_empty() {
                FilterState::Unfiltered
            } else {
                FilterState::FilterApplied
            };
        }
        self.paginator.first_page();
        self.cursor = 0;
        self.recompute();
        true
    }

    /// Replaces only the search text, keeping constraints and match mode.
    pub fn set_search(&mut self, text: &str) -> bool {
        let mut criteria = self.criteria.clone();
        criteria.search = text.to_string();
        self.set_filter(criteria)
    }

    /// Adds or replaces one equality constraint.
    pub fn set_constraint(&mut self, key: &str, value: &str) -> bool {
        let criteria = self.criteria.clone().with_constraint(key, value);
        self.set_filter(criteria)
    }

    /// Drops one equality constraint.
    pub fn remove_constraint(&mut self, key: &str) -> bool {
        let mut criteria = self.criteria.clone();
        if criteria.constraints.remove(key).is_none() {
            return false;
        }
        self.set_filter(criteria)
    }

    /// Switches the search comparison.
    pub fn set_match_mode(&mut self, mode: MatchMode) -> bool {
        let criteria = self.criteria.clone().with_mode(mode);
        self.set_filter(criteria)
    }

    /// Removes search text and constraints, keeping the match mode.
    pub fn clear_filter(&mut self) -> bool {
        let cleared = Criteria::new().with_mode(self.criteria.mode);
        self.filter_state = FilterState::Unfiltered;
        self.set_filter(cleared)
    }

    /// True while typing a search or with criteria in effect.
    pub fn is_filtering(&self) -> bool {
        self.filter_state != FilterState::Unfiltered
    }

    /// Starts editing the search line.
    pub fn start_filtering(&mut self) {
        self.query_before_edit = self.criteria.search.clone();
        self.query = self.criteria.search.clone();
        self.filter_state = FilterState::Filtering;
    }

    /// Appends a character to the search line and refilters.
    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_search(&query);
        self.query = query;
    }

    /// Deletes the last character of the search line and refilters.
    pub fn pop_query_char(&mut self) {
        let mut query = self.query.clone();
        query.pop();
        self.set_search(&query);
        self.query = query;
    }

    /// Keeps the typed search and leaves the search line.
    pub fn accept_filter(&mut self) {
        self.filter_state = if self.criteria.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::FilterApplied
        };
    }

    /// Restores the search from before editing and leaves the search line.
    pub fn cancel_filter(&mut self) {
        let previous = std::mem::take(&mut self.query_before_edit);
        self.set_search(&previous);
        self.query = previous;
        self.accept_filter();
    }
}
