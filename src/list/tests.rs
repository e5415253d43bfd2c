use super::*;
use crate::error::{require, FetchError, ValidationError};
use crate::filter::{Criteria, Filterable};
use crate::source::{DataSource, StaticSource};
use async_trait::async_trait;
use bubbletea_rs::Model as _;
use lipgloss_extras::lipgloss;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u32,
    name: String,
    status: &'static str,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Filterable for Row {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        (key == "status").then_some(self.status)
    }
}

impl Record for Row {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status)
    }
}

struct RowDraft {
    name: &'static str,
}

impl Draft<Row> for RowDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", self.name)
    }

    fn into_record(self, id: u32) -> Row {
        Row {
            id,
            name: self.name.to_string(),
            status: "active",
        }
    }
}

fn rows(n: u32) -> Vec<Row> {
    (1..=n)
        .map(|i| Row {
            id: i,
            name: format!("Customer {}", i),
            status: if i % 5 == 0 { "inactive" } else { "active" },
        })
        .collect()
}

fn names(items: &[&Row]) -> Vec<String> {
    items.iter().map(|r| r.name.clone()).collect()
}

fn press(code: KeyCode) -> KeyMsg {
    KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }
}

fn view(n: u32) -> ListView<Row> {
    ListView::new(rows(n), 10)
        .with_title("Customers")
        .with_item_name("customer", "customers")
}

struct FailingSource;

#[async_trait]
impl DataSource<Row> for FailingSource {
    async fn fetch(&self) -> Result<Vec<Row>, FetchError> {
        Err(FetchError::Status {
            status: 503,
            reason: "Service Unavailable".into(),
        })
    }
}

#[test]
fn test_pages_over_twenty_five_items() {
    let mut v = view(25);
    assert_eq!(v.total_pages(), 3);
    assert_eq!(v.visible_items().len(), 10);
    assert_eq!(v.visible_items()[0].id, 1);

    v.last_page();
    assert_eq!(v.page(), 3);
    let ids: Vec<u32> = v.visible_items().iter().map(|r| r.id).collect();
    assert_eq!(ids, (21..=25).collect::<Vec<_>>());
    assert_eq!(v.summary(), "Showing 21-25 of 25 customers");
}

#[test]
fn test_search_matches_all_or_nothing() {
    let mut v = view(25);
    assert!(v.set_search("cust"));
    assert_eq!(v.len(), 25);

    assert!(v.set_search("xyz"));
    assert!(v.is_empty());
    assert_eq!(v.total_pages(), 1);
    assert_eq!(v.page(), 1);
    assert!(v.visible_items().is_empty());
    assert!(v.selected_item().is_none());
    assert_eq!(v.summary(), "Showing 0 of 0 customers");
}

#[test]
fn test_filter_change_resets_page_and_identical_filter_is_noop() {
    let mut v = view(25);
    v.go_to(3);
    assert!(v.set_filter(Criteria::new().with_constraint("status", "active")));
    assert_eq!(v.page(), 1);
    assert_eq!(v.len(), 20);
    assert_eq!(v.filter_state(), FilterState::FilterApplied);

    v.next_page();
    let before = names(&v.visible_items());
    assert!(!v.set_filter(Criteria::new().with_constraint("status", "active")));
    assert_eq!(v.page(), 2);
    assert_eq!(names(&v.visible_items()), before);
}

#[test]
fn test_constraints_can_be_added_and_removed() {
    let mut v = view(25);
    assert!(v.set_constraint("status", "inactive"));
    assert_eq!(v.len(), 5);
    assert!(v.set_search("2"));
    assert_eq!(names(&v.filtered_items()), vec!["Customer 20", "Customer 25"]);

    assert!(v.remove_constraint("status"));
    assert!(!v.remove_constraint("status"));
    assert_eq!(v.criteria().search, "2");

    assert!(v.clear_filter());
    assert_eq!(v.len(), 25);
    assert_eq!(v.filter_state(), FilterState::Unfiltered);
}

#[test]
fn test_add_then_remove_restores_collection() {
    let mut v = view(12);
    let original = v.items().to_vec();

    let id = v.add_item(RowDraft { name: "Walk-in" }).unwrap();
    assert_eq!(id, 13);
    assert_eq!(v.items().len(), 13);
    assert_eq!(v.items().last().map(|r| r.name.as_str()), Some("Walk-in"));
    assert_eq!(v.total_pages(), 2);

    let removed = v.remove_item(&id).unwrap();
    assert_eq!(removed.id, 13);
    assert_eq!(v.items(), original.as_slice());
}

#[test]
fn test_add_after_maximum_id_reuses_a_free_id() {
    let mut v: ListView<Row> = ListView::new(
        vec![
            Row {
                id: 0,
                name: "Zero".into(),
                status: "active",
            },
            Row {
                id: u32::MAX,
                name: "Last".into(),
                status: "active",
            },
        ],
        10,
    );
    let id = v.add_item(RowDraft { name: "Walk-in" }).unwrap();
    assert_eq!(id, 1);
    assert_eq!(v.items().len(), 3);

    let second = v.add_item(RowDraft { name: "Another" }).unwrap();
    assert_eq!(second, 2);
}

#[test]
fn test_invalid_draft_leaves_collection_unchanged() {
    let mut v = view(3);
    let err = v.add_item(RowDraft { name: "   " }).unwrap_err();
    assert_eq!(err, ValidationError::MissingField { field: "name" });
    assert_eq!(err.reason(), "name is required");
    assert_eq!(v.items(), rows(3).as_slice());
    assert_eq!(v.stats().total, 3);
}

#[test]
fn test_front_insertion() {
    let mut v = view(3).with_insert_position(InsertPosition::Front);
    let id = v.add_item(RowDraft { name: "Newest" }).unwrap();
    assert_eq!(id, 4);
    assert_eq!(v.items()[0].name, "Newest");
    assert_eq!(v.visible_items()[0].id, 4);
}

#[test]
fn test_removing_last_item_on_last_page_clamps() {
    let mut v = view(21);
    v.last_page();
    assert_eq!(v.page(), 3);

    assert!(v.remove_item(&21).is_some());
    assert_eq!(v.total_pages(), 2);
    assert_eq!(v.page(), 2);
    assert_eq!(v.visible_items().len(), 10);
}

#[test]
fn test_missing_ids_are_noops() {
    let mut v = view(5);
    assert!(v.remove_item(&99).is_none());
    assert!(!v.update_item(&99, |r: &mut Row| r.name = "ghost".into()));
    assert_eq!(v.items(), rows(5).as_slice());
}

#[test]
fn test_update_item_merges_patch_and_refreshes_stats() {
    let mut v = view(5);
    assert_eq!(v.stats().count("inactive"), 1);

    assert!(v.update_item(&2, |r: &mut Row| r.status = "inactive"));
    assert_eq!(v.get(&2).map(|r| r.status), Some("inactive"));
    assert_eq!(v.stats().count("inactive"), 2);
}

#[test]
fn test_patch_cannot_change_id() {
    let mut v = view(5);
    assert!(!v.update_item(&2, |r: &mut Row| r.id = 1));
    assert_eq!(v.get(&2).map(|r| r.id), Some(2));
    assert_eq!(v.items(), rows(5).as_slice());
}

#[test]
fn test_stats_ignore_the_filter() {
    let mut v = view(25);
    v.set_search("Customer 1");
    assert_eq!(v.len(), 11);
    assert_eq!(v.stats().total, 25);
    assert_eq!(v.stats().count("active"), 20);
    assert_eq!(v.stats().count("inactive"), 5);
}

#[test]
fn test_set_items_drops_duplicate_ids() {
    let mut items = rows(3);
    items.push(items[0].clone());
    let v = ListView::new(items, 10);
    assert_eq!(v.items().len(), 3);
}

#[test]
fn test_cursor_crosses_pages() {
    let mut v = view(25);
    for _ in 0..9 {
        assert!(v.cursor_down().is_none());
    }
    assert_eq!(v.selected_item().map(|r| r.id), Some(10));

    assert!(v.cursor_down().is_some());
    assert_eq!(v.page(), 2);
    assert_eq!(v.selected_item().map(|r| r.id), Some(11));

    assert!(v.cursor_up().is_some());
    assert_eq!(v.page(), 1);
    assert_eq!(v.selected_item().map(|r| r.id), Some(10));
}

#[test]
fn test_remove_selected_keeps_cursor_in_range() {
    let mut v = view(21);
    v.last_page();
    assert_eq!(v.selected_item().map(|r| r.id), Some(21));
    assert_eq!(v.remove_selected().map(|r| r.id), Some(21));
    assert_eq!(v.page(), 2);
    assert_eq!(v.cursor(), 0);
    assert_eq!(v.selected_item().map(|r| r.id), Some(11));
}

#[tokio::test]
async fn test_page_keys_emit_scroll_to_top() {
    let mut v = view(25);
    let cmd = v.handle_key(&press(KeyCode::Right)).expect("page changed");
    assert_eq!(v.page(), 2);

    let msg = cmd.await.expect("message");
    let scroll = msg.downcast_ref::<ScrollToTopMsg>().expect("scroll message");
    assert_eq!(scroll.page, 2);
    assert_eq!(scroll.view_id, v.view_id());

    assert!(v.handle_key(&press(KeyCode::End)).is_some());
    assert_eq!(v.page(), 3);
    // already on the last page
    assert!(v.handle_key(&press(KeyCode::Right)).is_none());
    assert!(v.handle_key(&press(KeyCode::Home)).is_some());
    assert_eq!(v.page(), 1);
}

#[test]
fn test_search_line_keys() {
    let mut v = view(25);
    v.next_page();

    v.handle_key(&press(KeyCode::Char('/')));
    assert_eq!(v.filter_state(), FilterState::Filtering);
    for c in "er 2".chars() {
        v.handle_key(&press(KeyCode::Char(c)));
    }
    assert_eq!(v.query(), "er 2");
    assert_eq!(v.page(), 1);
    // Customer 2, 20..=25
    assert_eq!(v.len(), 7);

    // 'q' is text while typing, not quit
    v.handle_key(&press(KeyCode::Char('q')));
    assert!(v.is_empty());
    v.handle_key(&press(KeyCode::Backspace));
    assert_eq!(v.len(), 7);

    v.handle_key(&press(KeyCode::Enter));
    assert_eq!(v.filter_state(), FilterState::FilterApplied);
    assert_eq!(v.criteria().search, "er 2");

    v.handle_key(&press(KeyCode::Esc));
    assert_eq!(v.filter_state(), FilterState::Unfiltered);
    assert_eq!(v.len(), 25);
}

#[test]
fn test_cancel_restores_previous_search() {
    let mut v = view(25);
    v.set_search("Customer 1");
    v.handle_key(&press(KeyCode::Char('/')));
    v.handle_key(&press(KeyCode::Char('9')));
    assert_eq!(v.len(), 1);

    v.handle_key(&press(KeyCode::Esc));
    assert_eq!(v.filter_state(), FilterState::FilterApplied);
    assert_eq!(v.query(), "Customer 1");
    assert_eq!(v.len(), 11);
}

#[test]
fn test_remove_key_deletes_selected_row() {
    let mut v = view(3);
    v.handle_key(&press(KeyCode::Down));
    v.handle_key(&press(KeyCode::Char('x')));
    let ids: Vec<u32> = v.items().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_only_enter_applies_search() {
    let mut v = view(25);
    v.handle_key(&press(KeyCode::Char('/')));
    v.handle_key(&press(KeyCode::Char('2')));
    v.handle_key(&press(KeyCode::Tab));
    assert_eq!(v.filter_state(), FilterState::Filtering);
    assert_eq!(v.query(), "2");

    v.handle_key(&press(KeyCode::Enter));
    assert_eq!(v.filter_state(), FilterState::FilterApplied);
}

#[test]
fn test_quit_keys() {
    let mut v = view(3);
    assert!(v.handle_key(&press(KeyCode::Char('q'))).is_some());
    let ctrl_c = KeyMsg {
        key: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
    };
    assert!(v.handle_key(&ctrl_c).is_some());
}

#[tokio::test]
async fn test_load_replaces_collection() {
    let mut v: ListView<Row> = ListView::new(Vec::new(), 10);
    let cmd = v.load(Arc::new(StaticSource::new(rows(12)))).unwrap();
    assert!(v.is_loading());

    let msg = cmd.await.expect("loaded message");
    assert!(v.update(msg).is_none());
    assert!(!v.is_loading());
    assert_eq!(v.items().len(), 12);
    assert_eq!(v.total_pages(), 2);
    assert_eq!(v.load_state(), &LoadState::Loaded);
}

#[tokio::test]
async fn test_stale_response_is_ignored() {
    let mut v: ListView<Row> = ListView::new(Vec::new(), 10);
    let first = v.load(Arc::new(StaticSource::new(rows(3)))).unwrap();
    let second = v.retry().expect("source remembered");

    let stale = first.await.expect("message");
    let fresh = second.await.expect("message");

    let stale = *stale.downcast::<LoadedMsg<Row>>().expect("loaded message");
    assert!(!v.apply_loaded(stale));
    assert!(v.items().is_empty());

    let fresh = *fresh.downcast::<LoadedMsg<Row>>().expect("loaded message");
    assert!(v.apply_loaded(fresh));
    assert_eq!(v.items().len(), 3);
}

#[tokio::test]
async fn test_unmounted_view_ignores_response() {
    let mut v: ListView<Row> = ListView::new(Vec::new(), 10);
    let cmd = v.load(Arc::new(StaticSource::new(rows(3)))).unwrap();
    v.unmount();

    let msg = cmd.await.expect("message");
    v.update(msg);
    assert!(v.items().is_empty());
}

#[test]
fn test_unmounted_view_does_not_start_loading() {
    let mut v: ListView<Row> = ListView::new(Vec::new(), 10);
    v.unmount();

    assert!(v.load(Arc::new(StaticSource::new(rows(3)))).is_none());
    assert!(!v.is_loading());
    assert_eq!(v.load_state(), &LoadState::Idle);
    // the source is remembered, but retrying an unmounted view does nothing
    assert!(v.retry().is_none());
    assert!(!v.is_loading());
}

#[tokio::test]
async fn test_message_for_another_view_is_ignored() {
    let mut a: ListView<Row> = ListView::new(Vec::new(), 10);
    let mut b: ListView<Row> = ListView::new(Vec::new(), 10);
    assert_ne!(a.view_id(), b.view_id());

    let cmd = a.load(Arc::new(StaticSource::new(rows(3)))).unwrap();
    let msg = cmd.await.expect("message");
    b.update(msg);
    assert!(b.items().is_empty());
    assert_eq!(b.load_state(), &LoadState::Idle);
}

#[tokio::test]
async fn test_failed_load_then_retry() {
    let mut v: ListView<Row> = ListView::new(rows(2), 10);
    let cmd = v.load(Arc::new(FailingSource)).unwrap();
    v.update(cmd.await.expect("message"));

    match v.load_state() {
        LoadState::Failed(FetchError::Status { status, .. }) => assert_eq!(*status, 503),
        other => panic!("unexpected state {:?}", other),
    }
    // the previous snapshot survives a failed fetch
    assert_eq!(v.items().len(), 2);

    let screen = lipgloss::strip_ansi(&v.view());
    assert!(screen.contains("Error: API error: 503 Service Unavailable (press r to retry)"));

    let retry = v.handle_key(&press(KeyCode::Char('r'))).expect("retry command");
    assert!(v.is_loading());
    v.update(retry.await.expect("message"));
    assert!(matches!(v.load_state(), LoadState::Failed(_)));
}

#[test]
fn test_retry_without_source_does_nothing() {
    let mut v = view(2);
    assert!(v.retry().is_none());
    assert!(v.handle_key(&press(KeyCode::Char('r'))).is_none());
}

#[test]
fn test_view_renders_page_and_summary() {
    let mut v = view(25);
    let screen = lipgloss::strip_ansi(&v.view());
    assert!(screen.contains("Customers"));
    assert!(screen.contains("25 customers"));
    assert!(screen.contains("5 inactive"));
    assert!(screen.contains("Customer 10"));
    assert!(!screen.contains("Customer 11"));
    assert!(screen.contains("Showing 1-10 of 25 customers"));

    v.set_search("xyz");
    let screen = lipgloss::strip_ansi(&v.view());
    assert!(screen.contains("No customers found."));
    assert!(screen.contains("\"xyz\" (0 found)"));
}

#[test]
fn test_view_shows_search_line_while_typing() {
    let mut v = view(5);
    v.handle_key(&press(KeyCode::Char('/')));
    v.handle_key(&press(KeyCode::Char('3')));
    let screen = lipgloss::strip_ansi(&v.view());
    assert!(screen.contains("Search:"));
    assert!(screen.contains("Customer 3"));
}

#[test]
fn test_help_follows_state() {
    let mut v = view(25);
    let short: Vec<&str> = key::KeyMap::short_help(&v)
        .iter()
        .filter(|b| b.enabled())
        .map(|b| b.help().desc.as_str())
        .collect();
    assert!(short.contains(&"search"));
    assert!(!short.contains(&"retry"));

    v.handle_key(&press(KeyCode::Char('/')));
    let short: Vec<&str> = key::KeyMap::short_help(&v)
        .iter()
        .filter(|b| b.enabled())
        .map(|b| b.help().desc.as_str())
        .collect();
    assert_eq!(short.len(), 2);
}
