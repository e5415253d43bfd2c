//! Page arithmetic and the page-navigation control for list views.
//!
//! Pages are numbered from 1. A paginator never sits on a page that does
//! not exist: requests past either end are clamped, and an empty collection
//! still has one (empty) page.
//!
//! The free functions ([`total_pages`], [`paginate`], [`page_numbers`]) are
//! pure and can be used without the [`Model`]; the model adds navigation,
//! key handling and rendering on top of them.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::fmt;
use std::ops::Range;

/// With this many pages or fewer every page number is shown.
pub const MAX_UNCOMPRESSED_PAGES: usize = 7;

/// Number of consecutive page numbers shown next to an edge.
const EDGE_RUN: usize = 5;

/// One entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A page that can be navigated to.
    Page(usize),
    /// A gap standing in for omitted pages; not a navigation target.
    Ellipsis,
}

impl PageToken {
    /// The page number, or `None` for the ellipsis.
    pub fn page(&self) -> Option<usize> {
        match self {
            PageToken::Page(p) => Some(*p),
            PageToken::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(p) => write!(f, "{}", p),
            PageToken::Ellipsis => f.write_str("..."),
        }
    }
}

/// Number of pages needed for `total_items`, never less than 1.
///
/// A `per_page` of 0 is treated as 1.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1)).max(1)
}

/// The strip of page numbers to display for `current` out of `total`.
///
/// # Examples
///
/// ```rust
/// use posboard::paginator::{page_numbers, PageToken::{Ellipsis, Page}};
///
/// assert_eq!(page_numbers(1, 10), vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]);
/// assert_eq!(page_numbers(5, 10), vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]);
/// assert_eq!(page_numbers(10, 10), vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]);
/// ```
pub fn page_numbers(current: usize, total: usize) -> Vec<PageToken> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= MAX_UNCOMPRESSED_PAGES {
        return (1..=total).map(PageToken::Page).collect();
    }

    let mut tokens = Vec::with_capacity(MAX_UNCOMPRESSED_PAGES);
    if current <= 3 {
        tokens.extend((1..=EDGE_RUN).map(PageToken::Page));
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total));
    } else if current >= total - 2 {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
        tokens.extend((total - EDGE_RUN + 1..=total).map(PageToken::Page));
    } else {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
        tokens.extend((current - 1..=current + 1).map(PageToken::Page));
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total));
    }
    tokens
}

/// The visible window of a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The page actually shown, after clamping.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Number of items being paginated.
    pub total_items: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// Inclusive start index of the page.
    pub start: usize,
    /// Exclusive end index of the page.
    pub end: usize,
}

impl PageWindow {
    /// Index range of the page.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of items on the page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True only when there is nothing to paginate.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrows the page out of the full (filtered) slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        &items[self.start.min(end)..end]
    }

    /// True if a clamp moved the page away from `requested`.
    pub fn was_clamped(&self, requested: usize) -> bool {
        self.page != requested
    }

    /// "Showing 11-20 of 25 items" style summary, 1-based and inclusive.
    pub fn summary(&self, noun: &str) -> String {
        if self.is_empty() {
            return format!("Showing 0 of 0 {}", noun);
        }
        format!(
            "Showing {}-{} of {} {}",
            self.start + 1,
            self.end,
            self.total_items,
            noun
        )
    }
}

/// Computes the window for `requested` (1-indexed), clamping it into range.
///
/// # Examples
///
/// ```rust
/// use posboard::paginator::paginate;
///
/// let last = paginate(25, 10, 3);
/// assert_eq!(last.total_pages, 3);
/// assert_eq!(last.range(), 20..25);
///
/// // out of range requests are clamped and reported back
/// let clamped = paginate(25, 10, 9);
/// assert_eq!(clamped.page, 3);
/// assert!(clamped.was_clamped(9));
/// ```
pub fn paginate(total_items: usize, per_page: usize, requested: usize) -> PageWindow {
    let per_page = per_page.max(1);
    let pages = total_pages(total_items, per_page);
    let page = requested.clamp(1, pages);
    let start = ((page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    PageWindow {
        page,
        per_page,
        total_items,
        total_pages: pages,
        start,
        end,
    }
}

/// How the control is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// `« ‹ 1 2 3 4 5 … 10 › »` with the current page highlighted.
    #[default]
    Numbered,
    /// Compact `3/10`.
    Arabic,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Jump to page 1.
    pub first_page: key::Binding,
    /// Go back one page.
    pub prev_page: key::Binding,
    /// Go forward one page.
    pub next_page: key::Binding,
    /// Jump to the last page.
    pub last_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            first_page: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            prev_page: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            next_page: key::Binding::new(vec![
                KeyCode::PageDown,
                KeyCode::Right,
                KeyCode::Char('l'),
            ])
            .with_help("→/l", "next page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![
            &self.first_page,
            &self.prev_page,
            &self.next_page,
            &self.last_page,
        ]]
    }
}

/// Styles for the numbered control.
#[derive(Debug, Clone)]
pub struct PaginatorStyles {
    /// The current page number.
    pub active_page: Style,
    /// Other page numbers.
    pub page: Style,
    /// The ellipsis marker.
    pub ellipsis: Style,
    /// Navigation arrows that can be used.
    pub arrow: Style,
    /// Navigation arrows at the edge (first/last page).
    pub disabled_arrow: Style,
    /// The compact `3/10` form.
    pub arabic: Style,
}

impl Default for PaginatorStyles {
    fn default() -> Self {
        let subdued = || AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        Self {
            active_page: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .bold(true),
            page: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            ellipsis: Style::new().foreground(subdued()),
            arrow: Style::new().foreground(AdaptiveColor {
                Light: "#4F46E5",
                Dark: "#A5B4FC",
            }),
            disabled_arrow: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
            arabic: Style::new().foreground(subdued()),
        }
    }
}

/// Navigable pagination state.
///
/// `page` is 1-indexed and always within `1..=total_pages`.
///
/// # Examples
///
/// ```rust
/// use posboard::paginator::Model;
///
/// let mut paginator = Model::new().with_per_page(10).with_total_items(25);
/// assert_eq!(paginator.total_pages(), 3);
/// assert_eq!(paginator.get_slice_bounds(25), (0, 10));
///
/// assert!(paginator.last_page());
/// assert_eq!(paginator.page(), 3);
/// assert_eq!(paginator.get_slice_bounds(25), (20, 25));
///
/// // already there: nothing changes
/// assert!(!paginator.next_page());
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Rendering style.
    pub paginator_type: Type,
    /// Text used for the ellipsis marker.
    pub ellipsis: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
    /// Rendering styles.
    pub styles: PaginatorStyles,
    page: usize,
    per_page: usize,
    total_items: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            ellipsis: "…".to_string(),
            keymap: PaginatorKeyMap::default(),
            styles: PaginatorStyles::default(),
            page: 1,
            per_page: 10,
            total_items: 0,
        }
    }
}

impl Model {
    /// A paginator on page 1 of an empty collection, 10 items per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder form). Values below 1 become 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the item count (builder form).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the rendering style (builder form).
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Sets the page size and re-clamps the current page.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.clamp();
    }

    /// Sets the number of items being paginated and re-clamps the current
    /// page. Returns true if the page had to move.
    pub fn set_total_items(&mut self, items: usize) -> bool {
        self.total_items = items;
        self.clamp()
    }

    /// Current page, 1-indexed.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of items being paginated.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.per_page)
    }

    /// The current window.
    pub fn window(&self) -> PageWindow {
        paginate(self.total_items, self.per_page, self.page)
    }

    /// Start and end indices of the current page within a slice of `length`.
    pub fn get_slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Number of items on the current page.
    pub fn items_on_page(&self) -> usize {
        self.window().len()
    }

    /// The page-number strip for the current page.
    pub fn page_numbers(&self) -> Vec<PageToken> {
        page_numbers(self.page, self.total_pages())
    }

    /// True on page 1.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// True on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages()
    }

    /// Goes to `page`, clamped into range. Returns true if the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages());
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    /// Goes to page 1.
    pub fn first_page(&mut self) -> bool {
        self.go_to(1)
    }

    /// Goes back one page; no-op on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.on_first_page() {
            return false;
        }
        self.go_to(self.page - 1)
    }

    /// Goes forward one page; no-op on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            return false;
        }
        self.go_to(self.page + 1)
    }

    /// Goes to the last page.
    pub fn last_page(&mut self) -> bool {
        self.go_to(self.total_pages())
    }

    /// Handles navigation keys. Returns true if the page changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        self.handle_key(key_msg)
    }

    pub(crate) fn handle_key(&mut self, key_msg: &KeyMsg) -> bool {
        if self.keymap.next_page.matches(key_msg) {
            self.next_page()
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page()
        } else if self.keymap.first_page.matches(key_msg) {
            self.first_page()
        } else if self.keymap.last_page.matches(key_msg) {
            self.last_page()
        } else {
            false
        }
    }

    /// Renders the control.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self
                .styles
                .arabic
                .clone()
                .render(&format!("{}/{}", self.page, self.total_pages())),
            Type::Numbered => self.numbered_view(),
        }
    }

    fn numbered_view(&self) -> String {
        let arrow = |enabled: bool, glyph: &str| {
            if enabled {
                self.styles.arrow.clone().render(glyph)
            } else {
                self.styles.disabled_arrow.clone().render(glyph)
            }
        };

        let mut parts = vec![
            arrow(!self.on_first_page(), "«"),
            arrow(!self.on_first_page(), "‹"),
        ];
        for token in self.page_numbers() {
            parts.push(match token {
                PageToken::Page(p) if p == self.page => {
                    self.styles.active_page.clone().render(&format!(" {} ", p))
                }
                PageToken::Page(p) => self.styles.page.clone().render(&p.to_string()),
                PageToken::Ellipsis => self.styles.ellipsis.clone().render(&self.ellipsis),
            });
        }
        parts.push(arrow(!self.on_last_page(), "›"));
        parts.push(arrow(!self.on_last_page(), "»"));
        parts.join(" ")
    }

    // Pulls the page back into range. Returns true if it moved.
    fn clamp(&mut self) -> bool {
        let clamped = self.page.clamp(1, self.total_pages());
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }
}
