//! The stock row renderer.
//!
//! Each row is the record's `Display` text, with the search matches
//! underlined and the record's status shown as a trailing badge. The row
//! under the cursor gets a left border.

use super::style::ELLIPSIS;
use super::types::{FilterState, ItemDelegate, Record};
use super::ListView;
use crate::filter::{Criteria, Filterable};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};
use unicode_width::UnicodeWidthChar;

// Badge colors per well-known status; anything else is rendered neutral.
static STATUS_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("active", "#04B575"),
        ("available", "#04B575"),
        ("completed", "#04B575"),
        ("ready", "#04B575"),
        ("in_stock", "#04B575"),
        ("processing", "#5A56E0"),
        ("preparing", "#FF8700"),
        ("reserved", "#D7AF00"),
        ("pending", "#D7AF00"),
        ("low_stock", "#FF8700"),
        ("inactive", "#8A8A8A"),
        ("occupied", "#FF5F87"),
        ("out_of_stock", "#FF5F87"),
    ])
});

fn highlight(text: &str, matches: &[usize], highlight_style: &Style, normal_style: &Style) -> String {
    if matches.is_empty() {
        return normal_style.clone().render(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut pos = 0;
    for &m in matches.iter().filter(|&&m| m < chars.len()) {
        if pos < m {
            let segment: String = chars[pos..m].iter().collect();
            out.push_str(&normal_style.clone().render(&segment));
        }
        out.push_str(&highlight_style.clone().render(&chars[m].to_string()));
        pos = m + 1;
    }
    if pos < chars.len() {
        let rest: String = chars[pos..].iter().collect();
        out.push_str(&normal_style.clone().render(&rest));
    }
    out
}

// Match positions in `text` (the row's rendered text), taken only from the
// spans where the item's search fields appear in it.
fn search_field_matches<T: Filterable>(criteria: &Criteria, item: &T, text: &str) -> Vec<usize> {
    let mut positions = BTreeSet::new();
    for field in item.search_fields() {
        if field.is_empty() {
            continue;
        }
        let Some(byte_start) = text.find(field) else {
            continue;
        };
        let offset = text[..byte_start].chars().count();
        positions.extend(
            criteria
                .match_positions(field)
                .into_iter()
                .map(|pos| pos + offset),
        );
    }
    positions.into_iter().collect()
}

/// Cuts `text` to at most `max` terminal columns, ending with an ellipsis
/// when anything was cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Styles for [`DefaultDelegate`] rows.
#[derive(Debug, Clone)]
pub struct DefaultItemStyles {
    /// Row text.
    pub normal: Style,
    /// Row text under the cursor.
    pub selected: Style,
    /// The bar left of the row under the cursor.
    pub selected_border: Style,
    /// Rows while the search line is empty.
    pub dimmed: Style,
    /// Matched characters, layered over the row style.
    pub filter_match: Style,
    /// Status badge; the color comes from the status.
    pub badge: Style,
}

impl Default for DefaultItemStyles {
    fn default() -> Self {
        Self {
            normal: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .padding(0, 0, 0, 2),
            selected: Style::new()
                .foreground(Color::from("#EE6FF8"))
                .padding(0, 0, 0, 1),
            selected_border: Style::new().foreground(Color::from("#AD58B4")),
            dimmed: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(0, 0, 0, 2),
            filter_match: Style::new().underline(true),
            badge: Style::new().bold(true),
        }
    }
}

/// Renders one line per record.
#[derive(Debug, Clone, Default)]
pub struct DefaultDelegate {
    /// Row styles.
    pub styles: DefaultItemStyles,
    /// Hide the status badge.
    pub hide_status: bool,
}

impl DefaultDelegate {
    /// A delegate with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    fn badge(&self, status: &str) -> String {
        let color = STATUS_COLORS.get(status).copied().unwrap_or("#8A8A8A");
        self.styles
            .badge
            .clone()
            .foreground(Color::from(color))
            .render(&status.replace('_', " "))
    }
}

impl<T: Record> ItemDelegate<T> for DefaultDelegate {
    fn render(&self, view: &ListView<T>, position: usize, item: &T) -> String {
        let s = &self.styles;
        let is_selected = view.selected_position() == Some(position);
        let empty_search =
            view.filter_state() == FilterState::Filtering && view.query().is_empty();

        // leave room for the padding and the badge
        let budget = view.width.saturating_sub(16).max(8);
        let full = item.to_string();
        let text = truncate_to_width(&full, budget);

        let row_style = if empty_search {
            &s.dimmed
        } else if is_selected {
            &s.selected
        } else {
            &s.normal
        };
        // positions past the cut (and the ellipsis itself) are dropped
        let kept = if text == full {
            full.chars().count()
        } else {
            text.chars().count().saturating_sub(1)
        };
        let mut matches = search_field_matches(view.criteria(), item, &full);
        matches.retain(|&pos| pos < kept);
        let highlight_style = row_style.clone().inherit(s.filter_match.clone());
        let mut row = highlight(&text, &matches, &highlight_style, row_style);
        if is_selected && !empty_search {
            row = format!("{}{}", s.selected_border.clone().render("│"), row);
        }

        match item.status() {
            Some(status) if !self.hide_status => format!("{}  {}", row, self.badge(status)),
            _ => row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("Customer 25", 6), "Custo…");
        // wide characters count double
        assert_eq!(truncate_to_width("ผัดไทย กุ้งสด", 40), "ผัดไทย กุ้งสด");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    struct Dish {
        name: &'static str,
        table: &'static str,
    }

    impl Filterable for Dish {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }
    }

    #[test]
    fn test_only_searched_fields_are_highlighted() {
        let dish = Dish {
            name: "Som Tam",
            table: "Table 7 · Tamarind room",
        };
        let text = format!("{} · {}", dish.name, dish.table);
        let c = Criteria::search("tam");
        // "Tam" in the table text is not a search field
        assert_eq!(search_field_matches(&c, &dish, &text), vec![4, 5, 6]);
        assert!(search_field_matches(&Criteria::search("table"), &dish, &text).is_empty());
    }

    #[test]
    fn test_highlight_offsets_follow_the_field() {
        let dish = Dish {
            name: "Pad Thai",
            table: "",
        };
        let text = format!("#12 · {}", dish.name);
        assert_eq!(
            search_field_matches(&Criteria::search("thai"), &dish, &text),
            vec![10, 11, 12, 13]
        );
    }

    #[test]
    fn test_highlight_without_matches_is_plain() {
        let plain = Style::new();
        let out = highlight("abc", &[], &plain, &plain);
        assert_eq!(lipgloss::strip_ansi(&out), "abc");
    }

    #[test]
    fn test_highlight_keeps_all_text() {
        let plain = Style::new();
        let bold = Style::new().bold(true);
        let out = highlight("Customer", &[0, 3, 99], &bold, &plain);
        assert_eq!(lipgloss::strip_ansi(&out), "Customer");
    }
}
