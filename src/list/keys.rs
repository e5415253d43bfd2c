//! Key bindings for list views.
//!
//! - **Cursor**: `↑/k`, `↓/j`
//! - **Pages**: `→/l/pgdn` next, `←/h/pgup` prev, `g/home` first, `G/end` last
//! - **Search**: `/` to type, `enter` to apply, `esc` to cancel or clear
//! - **Records**: `x/delete` remove the selected record, `r` retry a failed load
//! - **Help and quit**: `?`, `q`, `ctrl+c`

use crate::key;
use crossterm::event::{KeyCode, KeyModifiers};

/// Every binding a list view responds to.
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    /// Move the cursor up.
    pub cursor_up: key::Binding,
    /// Move the cursor down.
    pub cursor_down: key::Binding,
    /// Next page.
    pub next_page: key::Binding,
    /// Previous page.
    pub prev_page: key::Binding,
    /// First page.
    pub first_page: key::Binding,
    /// Last page.
    pub last_page: key::Binding,
    /// Start typing a search.
    pub filter: key::Binding,
    /// Clear the applied search and constraints.
    pub clear_filter: key::Binding,
    /// Leave the search line, restoring the previous search.
    pub cancel_filter: key::Binding,
    /// Leave the search line, keeping what was typed.
    pub accept_filter: key::Binding,
    /// Select the record under the cursor.
    pub select: key::Binding,
    /// Remove the record under the cursor.
    pub remove: key::Binding,
    /// Retry a failed load.
    pub retry: key::Binding,
    /// Expand the help.
    pub show_full_help: key::Binding,
    /// Collapse the help.
    pub close_full_help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
    /// Quit from anywhere, including the search line.
    pub force_quit: key::Binding,
}

impl Default for ListKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::Binding::new(vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::PageDown,
            ])
            .with_help("→/l/pgdn", "next page"),
            prev_page: key::Binding::new(vec![
                KeyCode::Left,
                KeyCode::Char('h'),
                KeyCode::PageUp,
            ])
            .with_help("←/h/pgup", "prev page"),
            first_page: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
            filter: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            clear_filter: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear search"),
            cancel_filter: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
            accept_filter: key::Binding::new(vec![KeyCode::Enter])
                .with_help("enter", "apply search"),
            select: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "select"),
            remove: key::Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
                .with_help("x", "remove"),
            retry: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "retry"),
            show_full_help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            close_full_help: key::Binding::new(vec![KeyCode::Char('?')])
                .with_help("?", "close help"),
            quit: key::Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: key::Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
                .with_help("ctrl+c", "force quit"),
        }
    }
}
