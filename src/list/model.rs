//! The `ListView` struct, its construction and read-only accessors.

use super::defaultitem::DefaultDelegate;
use super::keys::ListKeyMap;
use super::style::ListStyles;
use super::types::{FilterState, InsertPosition, ItemDelegate, Record, Stats};
use crate::filter::{Criteria, MatchMode};
use crate::paginator::{self, PageToken, PageWindow};
use crate::source::{DataSource, LoadState, Loader};
use crate::{help, help::Model as HelpModel};
use std::sync::Arc;

/// Filter, paginator and mutations over one in-memory collection.
///
/// The view owns its collection. The filtered view, the page window and the
/// aggregate [`Stats`] are derived from it and recomputed synchronously on
/// every change, so reads never observe a stale page.
pub struct ListView<T: Record> {
    pub(super) title: String,
    pub(super) item_singular: String,
    pub(super) item_plural: String,
    pub(super) items: Vec<T>,

    // Filter
    pub(super) criteria: Criteria,
    pub(super) filtered: Vec<usize>,
    pub(super) filter_state: FilterState,
    pub(super) query: String,
    pub(super) query_before_edit: String,

    // Pagination, cursor is relative to the current page
    pub(super) paginator: paginator::Model,
    pub(super) cursor: usize,

    pub(super) stats: Stats,
    pub(super) insert_position: InsertPosition,

    // Loading
    pub(super) loader: Loader,
    pub(super) source: Option<Arc<dyn DataSource<T>>>,

    // UI
    pub(super) delegate: Box<dyn ItemDelegate<T>>,
    pub(super) styles: ListStyles,
    pub(super) keymap: ListKeyMap,
    pub(super) help: HelpModel,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl<T: Record> ListView<T> {
    /// Creates a view over `items` showing `per_page` records per page.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use posboard::list::ListView;
    /// use posboard::mock::MockGenerator;
    ///
    /// let customers = MockGenerator::seeded(1).customers(25);
    /// let view = ListView::new(customers, 10);
    /// assert_eq!(view.total_pages(), 3);
    /// assert_eq!(view.visible_items().len(), 10);
    /// ```
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        let paginator = paginator::Model::new().with_per_page(per_page);
        let mut view = Self {
            title: "List".to_string(),
            item_singular: "item".to_string(),
            item_plural: "items".to_string(),
            items: Vec::new(),
            criteria: Criteria::new(),
            filtered: Vec::new(),
            filter_state: FilterState::Unfiltered,
            query: String::new(),
            query_before_edit: String::new(),
            paginator,
            cursor: 0,
            stats: Stats::default(),
            insert_position: InsertPosition::default(),
            loader: Loader::new(),
            source: None,
            delegate: Box::new(DefaultDelegate::new()),
            styles: ListStyles::default(),
            keymap: ListKeyMap::default(),
            help: help::Model::new(),
            width: 80,
            height: 24,
        };
        view.set_items(items);
        view
    }

    /// Sets the title shown in the header.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the nouns used in the status line and page summary.
    pub fn with_item_name(mut self, singular: &str, plural: &str) -> Self {
        self.item_singular = singular.to_string();
        self.item_plural = plural.to_string();
        self
    }

    /// Chooses where `add_item` inserts.
    pub fn with_insert_position(mut self, position: InsertPosition) -> Self {
        self.insert_position = position;
        self
    }

    /// Replaces the row renderer.
    pub fn with_delegate<D: ItemDelegate<T> + 'static>(mut self, delegate: D) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    /// Switches between substring and fuzzy search.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        let criteria = self.criteria.clone().with_mode(mode);
        self.set_filter(criteria);
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: ListStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the terminal size available to the view.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.help.width = width;
    }

    /// Width and height set by [`ListView::set_size`].
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Title shown in the header.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The whole collection, in order, ignoring the filter.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of records passing the filter.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    /// True when no record passes the filter.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Records passing the filter, in collection order.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.filtered.iter().map(|&i| &self.items[i]).collect()
    }

    /// Records on the current page.
    pub fn visible_items(&self) -> Vec<&T> {
        self.window()
            .slice(&self.filtered)
            .iter()
            .map(|&i| &self.items[i])
            .collect()
    }

    /// The current page window over the filtered records.
    pub fn window(&self) -> PageWindow {
        self.paginator.window()
    }

    /// Current page, 1-indexed.
    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    /// Page size.
    pub fn per_page(&self) -> usize {
        self.paginator.per_page()
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    /// Page numbers to display, with ellipsis markers.
    pub fn page_numbers(&self) -> Vec<PageToken> {
        self.paginator.page_numbers()
    }

    /// "Showing 1-10 of 25 customers".
    pub fn summary(&self) -> String {
        self.window().summary(&self.item_plural)
    }

    /// The active criteria.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Whether the search line is being edited or a filter is applied.
    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    /// The search text as currently typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Aggregate counts over the unfiltered collection.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// State of the view's fetch.
    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    /// Process-unique id carried by this view's messages.
    pub fn view_id(&self) -> u64 {
        self.loader.view_id()
    }

    /// Cursor offset within the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Position of the selected record in the filtered collection.
    pub fn selected_position(&self) -> Option<usize> {
        let window = self.window();
        (!window.is_empty()).then(|| window.start + self.cursor)
    }

    /// The record under the cursor.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected_position()
            .and_then(|pos| self.filtered.get(pos))
            .map(|&i| &self.items[i])
    }

    /// Mutable access to the help bar, e.g. to expand it.
    pub fn help_mut(&mut self) -> &mut HelpModel {
        &mut self.help
    }

    // Refilters after the collection or criteria changed and pulls the page
    // and cursor back into range.
    pub(super) fn recompute(&mut self) {
        self.filtered = crate::filter::filter_indices(&self.items, &self.criteria);
        if self.paginator.set_total_items(self.filtered.len()) {
            tracing::debug!(page = self.paginator.page(), "page clamped");
        }
        self.clamp_cursor();
        self.update_keybindings();
    }

    pub(super) fn clamp_cursor(&mut self) {
        self.cursor = self
            .cursor
            .min(self.paginator.items_on_page().saturating_sub(1));
    }
}
