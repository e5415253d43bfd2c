//! Contextual help bar rendered at the bottom of every list view.
//!
//! The bar shows either a single line of the most useful bindings or, when
//! `show_all` is set, columns of every binding grouped by purpose. Bindings
//! come from any [`KeyMap`] implementation.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help bar.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Ellipsis shown when the bar is truncated.
    pub ellipsis: Style,
    /// Key text in the short view.
    pub short_key: Style,
    /// Description text in the short view.
    pub short_desc: Style,
    /// Separator between short-view entries.
    pub short_separator: Style,
    /// Key text in the full view.
    pub full_key: Style,
    /// Description text in the full view.
    pub full_desc: Style,
    /// Separator between full-view columns.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// The help bar model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Show every binding in columns instead of the single line.
    pub show_all: bool,
    /// Maximum width; 0 means unbounded.
    pub width: usize,
    /// Separator between short-view entries.
    pub short_separator: String,
    /// Separator between full-view columns.
    pub full_separator: String,
    /// Marker shown when entries are cut off.
    pub ellipsis: String,
    /// Rendering styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help bar with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the help for a key map in the current mode.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders bindings on one line, truncating with an ellipsis when the
    /// width is exceeded.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut out = String::new();
        let mut total_width = 0;
        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let entry = format!(
                "{}{} {}",
                sep,
                self.styles.short_key.clone().inline(true).render(&help.key),
                self.styles.short_desc.clone().inline(true).render(&help.desc)
            );
            let entry_width = lipgloss::width_visible(&entry);

            if let Some(tail) = self.truncation_tail(total_width, entry_width) {
                out.push_str(&tail);
                break;
            }
            total_width += entry_width;
            out.push_str(&entry);
        }
        out
    }

    /// Renders binding groups as side-by-side columns.
    pub fn full_help_view(&self, groups: Vec<Vec<&Binding>>) -> String {
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        let mut columns = Vec::new();
        let mut total_width = 0;
        for group in groups.iter().filter(|g| g.iter().any(|b| b.enabled())) {
            let column = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    format!(
                        "{} {}",
                        self.styles.full_key.clone().inline(true).render(&help.key),
                        self.styles.full_desc.clone().inline(true).render(&help.desc)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            let column_width = lipgloss::width_visible(&column);

            if let Some(tail) = self.truncation_tail(total_width, column_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            total_width += column_width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(col.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    // Some(tail) when the next entry does not fit; the tail may be empty if
    // even the ellipsis would overflow.
    fn truncation_tail(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    struct Keys {
        next: Binding,
        prev: Binding,
    }

    impl KeyMap for Keys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.prev, &self.next]
        }
        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.prev, &self.next]]
        }
    }

    fn keys() -> Keys {
        Keys {
            next: Binding::new(vec![KeyCode::Right]).with_help("→", "next page"),
            prev: Binding::new(vec![KeyCode::Left]).with_help("←", "prev page"),
        }
    }

    #[test]
    fn test_short_view_lists_enabled_bindings() {
        let help = Model::new();
        let plain = lipgloss::strip_ansi(&help.view(&keys()));
        assert!(plain.contains("← prev page"));
        assert!(plain.contains("→ next page"));
    }

    #[test]
    fn test_short_view_truncates_to_width() {
        let mut help = Model::new();
        help.width = 14;
        let plain = lipgloss::strip_ansi(&help.view(&keys()));
        assert!(plain.contains("prev page"));
        assert!(!plain.contains("next page"));
    }
}
