//! Styles for list views.
//!
//! Defaults use `AdaptiveColor` so they read well on light and dark
//! terminals.

use lipgloss_extras::prelude::*;

/// Separator between entries of the stats line.
pub const BULLET: &str = "•";

/// Marker appended to truncated rows.
pub const ELLIPSIS: &str = "…";

/// Styles for every part of a list view except the rows themselves.
#[derive(Debug, Clone)]
pub struct ListStyles {
    /// Wraps the title line.
    pub title_bar: Style,
    /// The title itself.
    pub title: Style,
    /// "Search:" while typing.
    pub filter_prompt: Style,
    /// Block cursor after the query.
    pub filter_cursor: Style,
    /// Record and status counts.
    pub stats: Style,
    /// The applied filter note next to the title.
    pub status_bar_active_filter: Style,
    /// "No customers found."
    pub no_items: Style,
    /// Shown while a fetch is in flight.
    pub loading: Style,
    /// Fetch failures.
    pub error: Style,
    /// Page numbers.
    pub pagination_style: Style,
    /// "Showing 1-10 of 25".
    pub summary: Style,
    /// Help footer.
    pub help_style: Style,
    /// Separator in the stats line.
    pub divider_dot: Style,
}

impl Default for ListStyles {
    fn default() -> Self {
        let very_subdued_color = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title_bar: Style::new().padding(0, 0, 1, 2),
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            filter_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            filter_cursor: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            stats: Style::new()
                .foreground(subdued_color.clone())
                .padding_left(2),
            status_bar_active_filter: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            no_items: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#909090",
                    Dark: "#626262",
                })
                .padding_left(2),
            loading: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#8E8E8E",
                    Dark: "#747373",
                })
                .padding_left(2),
            error: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#D70000",
                    Dark: "#FF5F87",
                })
                .padding_left(2),
            pagination_style: Style::new().padding_left(2),
            summary: Style::new().foreground(subdued_color).padding_left(2),
            help_style: Style::new().padding(1, 0, 0, 2),
            divider_dot: Style::new().foreground(very_subdued_color),
        }
    }
}
