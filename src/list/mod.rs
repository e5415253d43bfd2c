//! List View State: a filtered, paginated, mutable collection with a
//! terminal rendering.
//!
//! `ListView<T: Record>` composes the [`crate::filter`] predicate and the
//! [`crate::paginator`] over a collection it owns:
//!
//! - the filtered view is recomputed synchronously whenever the collection or
//!   the criteria change;
//! - a change of criteria returns to page 1, identical criteria change
//!   nothing;
//! - after every mutation the page is re-clamped so it always exists;
//! - aggregate [`Stats`] describe the whole collection regardless of the
//!   filter.
//!
//! The view is also a bubbletea model. Keys drive navigation, the search
//! line and record removal; every page change emits a [`ScrollToTopMsg`];
//! the initial fetch arrives as a [`LoadedMsg`] and is dropped if stale.
//!
//! ### Filtering states
//! - `Unfiltered`: no criteria
//! - `Filtering`: the search line has focus and every keystroke refilters
//! - `FilterApplied`: criteria are in effect
//!
//! ### Help integration
//! The view implements [`key::KeyMap`], so the embedded help bar always shows
//! the bindings that apply in the current state.

pub mod defaultitem;
pub mod keys;
pub mod style;

mod api;
mod filtering;
mod loading;
mod model;
mod rendering;
mod types;

#[cfg(test)]
mod tests;

pub use defaultitem::{DefaultDelegate, DefaultItemStyles};
pub use keys::ListKeyMap;
pub use model::ListView;
pub use style::ListStyles;
pub use types::{
    Draft, FilterState, InsertPosition, ItemDelegate, LoadedMsg, NextId, Patch, Record,
    ScrollToTopMsg, Stats,
};

use crate::key;
use crate::source::LoadState;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

impl<T: Record> key::KeyMap for ListView<T> {
    fn short_help(&self) -> Vec<&key::Binding> {
        match self.filter_state {
            FilterState::Filtering => vec![&self.keymap.accept_filter, &self.keymap.cancel_filter],
            _ => vec![
                &self.keymap.cursor_up,
                &self.keymap.cursor_down,
                &self.keymap.next_page,
                &self.keymap.prev_page,
                &self.keymap.filter,
                &self.keymap.clear_filter,
                &self.keymap.retry,
                &self.keymap.quit,
                &self.keymap.show_full_help,
            ],
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.keymap.cursor_up,
                &self.keymap.cursor_down,
                &self.keymap.next_page,
                &self.keymap.prev_page,
                &self.keymap.first_page,
                &self.keymap.last_page,
            ],
            vec![
                &self.keymap.filter,
                &self.keymap.clear_filter,
                &self.keymap.accept_filter,
                &self.keymap.cancel_filter,
            ],
            vec![&self.keymap.select, &self.keymap.remove, &self.keymap.retry],
            vec![
                &self.keymap.close_full_help,
                &self.keymap.quit,
                &self.keymap.force_quit,
            ],
        ]
    }
}

impl<T: Record> ListView<T> {
    // Enables only the bindings that do something in the current state.
    pub(super) fn update_keybindings(&mut self) {
        let filtering = self.filter_state == FilterState::Filtering;
        let has_selection = self.selected_item().is_some();
        let multi_page = self.total_pages() > 1;
        let failed = matches!(self.loader.state(), LoadState::Failed(_));

        let km = &mut self.keymap;
        km.cursor_up.set_enabled(!filtering && has_selection);
        km.cursor_down.set_enabled(!filtering && has_selection);
        for binding in [
            &mut km.next_page,
            &mut km.prev_page,
            &mut km.first_page,
            &mut km.last_page,
        ] {
            binding.set_enabled(!filtering && multi_page);
        }
        km.filter.set_enabled(!filtering);
        km.clear_filter
            .set_enabled(self.filter_state == FilterState::FilterApplied);
        km.accept_filter.set_enabled(filtering);
        km.cancel_filter.set_enabled(filtering);
        km.select.set_enabled(!filtering && has_selection);
        km.remove.set_enabled(!filtering && has_selection);
        km.retry
            .set_enabled(!filtering && failed && self.source.is_some());
        km.show_full_help
            .set_enabled(!filtering && !self.help.show_all);
        km.close_full_help
            .set_enabled(!filtering && self.help.show_all);
        km.quit.set_enabled(!filtering);
    }

    fn handle_filter_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.cancel_filter.matches(key_msg) {
            self.cancel_filter();
        } else if self.keymap.accept_filter.matches(key_msg) {
            self.accept_filter();
        } else {
            match key_msg.key {
                KeyCode::Backspace => self.pop_query_char(),
                KeyCode::Char(c)
                    if key_msg.modifiers == KeyModifiers::NONE
                        || key_msg.modifiers == KeyModifiers::SHIFT =>
                {
                    self.push_query_char(c)
                }
                _ => {}
            }
        }
        None
    }

    /// Handles one key press. Returns the command the key produced, if any.
    pub fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.force_quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }
        self.update_keybindings();

        let cmd = if self.filter_state == FilterState::Filtering {
            self.handle_filter_key(key_msg)
        } else if self.keymap.cursor_up.matches(key_msg) {
            self.cursor_up()
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.cursor_down()
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page()
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page()
        } else if self.keymap.first_page.matches(key_msg) {
            self.first_page()
        } else if self.keymap.last_page.matches(key_msg) {
            self.last_page()
        } else if self.keymap.filter.matches(key_msg) {
            self.start_filtering();
            None
        } else if self.keymap.clear_filter.matches(key_msg) {
            self.clear_filter();
            None
        } else if self.keymap.remove.matches(key_msg) {
            if let Some(removed) = self.remove_selected() {
                tracing::info!(id = %removed.id(), "removed selected record");
            }
            None
        } else if self.keymap.retry.matches(key_msg) {
            self.retry()
        } else if self.keymap.show_full_help.matches(key_msg)
            || self.keymap.close_full_help.matches(key_msg)
        {
            self.help.show_all = !self.help.show_all;
            None
        } else if self.keymap.quit.matches(key_msg) {
            Some(bubbletea_rs::quit())
        } else if self.keymap.select.matches(key_msg) {
            let position = self.selected_position()?;
            let item = self.items.get(*self.filtered.get(position)?)?;
            self.delegate.on_select(position, item)
        } else {
            None
        };

        self.update_keybindings();
        cmd
    }
}

impl<T: Record> BubbleTeaModel for ListView<T> {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new(), 10), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(loaded) = msg.downcast_ref::<LoadedMsg<T>>() {
            if loaded.ticket.view_id == self.view_id() {
                self.apply_loaded(loaded.clone());
                self.update_keybindings();
            }
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }

    fn view(&self) -> String {
        let mut sections = vec![self.view_header()];
        if self.stats.total > 0 {
            sections.push(self.view_stats());
        }
        let items = self.view_items();
        if !items.is_empty() {
            sections.push(items);
        }
        if !self.loader.is_loading() && self.loader.error().is_none() {
            sections.push(self.view_pagination());
        }
        let footer = self.view_footer();
        if !footer.is_empty() {
            sections.push(footer);
        }
        sections.join("\n")
    }
}
