//! Mutations and navigation on a list view.
//!
//! Every mutation recomputes the filtered view and the aggregate stats before
//! returning, and re-clamps the page so it never points past the end.

use super::types::{Draft, InsertPosition, NextId, Patch, Record, ScrollToTopMsg, Stats};
use super::ListView;
use crate::error::ValidationError;
use bubbletea_rs::{Cmd, Msg};
use std::collections::HashSet;

impl<T: Record> ListView<T> {
    /// Replaces the whole collection, e.g. with a freshly fetched snapshot.
    ///
    /// Criteria are kept; records with an id seen earlier in `items` are
    /// dropped.
    pub fn set_items(&mut self, items: Vec<T>) {
        let mut seen = HashSet::new();
        let before = items.len();
        let mut unique: Vec<T> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
        if unique.len() != before {
            tracing::warn!(dropped = before - unique.len(), "duplicate ids in snapshot");
        }
        unique.shrink_to_fit();
        self.items = unique;
        self.collection_changed();
    }

    /// Validates `draft`, assigns it a fresh id and inserts it.
    ///
    /// Returns the new id. On a validation error the collection is left as
    /// it was.
    pub fn add_item<D: Draft<T>>(&mut self, draft: D) -> Result<T::Id, ValidationError> {
        draft.validate()?;

        let id = {
            let existing: HashSet<&T::Id> = self.items.iter().map(Record::id).collect();
            <T::Id as NextId>::next_id(&existing)
        };
        let record = draft.into_record(id.clone());
        match self.insert_position {
            InsertPosition::Front => self.items.insert(0, record),
            InsertPosition::Back => self.items.push(record),
        }
        tracing::debug!(%id, "record added");
        self.collection_changed();
        Ok(id)
    }

    /// Removes the record with `id`, returning it. An unknown id is a no-op.
    pub fn remove_item(&mut self, id: &T::Id) -> Option<T> {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            tracing::debug!(%id, "remove: no such record");
            return None;
        };
        let removed = self.items.remove(index);
        self.collection_changed();
        Some(removed)
    }

    /// Removes the record under the cursor.
    pub fn remove_selected(&mut self) -> Option<T> {
        let id = self.selected_item()?.id().clone();
        self.remove_item(&id)
    }

    /// Merges `patch` into the record with `id`. Returns false if there is
    /// no such record.
    ///
    /// A patch may not change the record's id; such a patch is rolled back.
    pub fn update_item<P: Patch<T>>(&mut self, id: &T::Id, patch: P) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            tracing::debug!(%id, "update: no such record");
            return false;
        };
        let original = item.clone();
        patch.apply(item);
        if item.id() != id {
            tracing::warn!(%id, new_id = %item.id(), "patch changed the id, rolled back");
            *item = original;
            return false;
        }
        self.collection_changed();
        true
    }

    // Stats always describe the unfiltered collection.
    fn collection_changed(&mut self) {
        self.stats = Stats::from_items(&self.items);
        self.recompute();
    }

    /// Goes to page 1.
    pub fn first_page(&mut self) -> Option<Cmd> {
        let changed = self.paginator.first_page();
        self.page_changed(changed)
    }

    /// Goes back one page; no-op on page 1.
    pub fn prev_page(&mut self) -> Option<Cmd> {
        let changed = self.paginator.prev_page();
        self.page_changed(changed)
    }

    /// Goes forward one page; no-op on the last page.
    pub fn next_page(&mut self) -> Option<Cmd> {
        let changed = self.paginator.next_page();
        self.page_changed(changed)
    }

    /// Goes to the last page.
    pub fn last_page(&mut self) -> Option<Cmd> {
        let changed = self.paginator.last_page();
        self.page_changed(changed)
    }

    /// Goes to `page`, clamped into range.
    pub fn go_to(&mut self, page: usize) -> Option<Cmd> {
        let changed = self.paginator.go_to(page);
        self.page_changed(changed)
    }

    // A page change resets the cursor and asks the screen to scroll up.
    pub(super) fn page_changed(&mut self, changed: bool) -> Option<Cmd> {
        if !changed {
            return None;
        }
        self.cursor = 0;
        let msg = ScrollToTopMsg {
            view_id: self.view_id(),
            page: self.page(),
        };
        let cmd: Cmd = Box::pin(async move { Some(Box::new(msg) as Msg) });
        Some(cmd)
    }

    /// Moves the cursor up, onto the previous page's last row at the top.
    pub fn cursor_up(&mut self) -> Option<Cmd> {
        if self.cursor > 0 {
            self.cursor -= 1;
            return None;
        }
        let cmd = self.prev_page();
        if cmd.is_some() {
            self.cursor = self.paginator.items_on_page().saturating_sub(1);
        }
        cmd
    }

    /// Moves the cursor down, onto the next page's first row at the bottom.
    pub fn cursor_down(&mut self) -> Option<Cmd> {
        if self.cursor + 1 < self.paginator.items_on_page() {
            self.cursor += 1;
            return None;
        }
        self.next_page()
    }
}
