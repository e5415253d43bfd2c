//! View rendering for list views.
//!
//! A view is composed top to bottom of the header (title or search line), the
//! stats line, the rows of the current page (or a loading, error or empty
//! message), the page numbers with the summary, and the help footer.

use super::style::BULLET;
use super::types::{FilterState, Record};
use super::ListView;
use crate::source::LoadState;

impl<T: Record> ListView<T> {
    pub(super) fn view_header(&self) -> String {
        if self.filter_state == FilterState::Filtering {
            let prompt = self.styles.filter_prompt.clone().render("Search: ");
            let cursor = self.styles.filter_cursor.clone().render("█");
            return format!("  {}{}{}", prompt, self.query, cursor);
        }

        let mut header = self.styles.title.clone().render(&self.title);
        if self.filter_state == FilterState::FilterApplied {
            let mut applied = Vec::new();
            if !self.criteria.search.is_empty() {
                applied.push(format!("\"{}\"", self.criteria.search));
            }
            applied.extend(
                self.criteria
                    .constraints
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v)),
            );
            let note = format!(" {} ({} found)", applied.join(" "), self.len());
            header.push_str(&self.styles.status_bar_active_filter.clone().render(&note));
        }
        self.styles.title_bar.clone().render(&header)
    }

    pub(super) fn view_stats(&self) -> String {
        let noun = if self.stats.total == 1 {
            &self.item_singular
        } else {
            &self.item_plural
        };
        let mut parts = vec![format!("{} {}", self.stats.total, noun)];
        parts.extend(
            self.stats
                .by_status
                .iter()
                .map(|(status, n)| format!("{} {}", n, status.replace('_', " "))),
        );
        let divider = self
            .styles
            .divider_dot
            .clone()
            .render(&format!(" {} ", BULLET));
        self.styles.stats.clone().render(&parts.join(&divider))
    }

    pub(super) fn view_items(&self) -> String {
        match self.loader.state() {
            LoadState::Loading => {
                return self
                    .styles
                    .loading
                    .clone()
                    .render(&format!("Loading {}…", self.item_plural));
            }
            LoadState::Failed(err) => {
                let hint = if self.source.is_some() {
                    " (press r to retry)"
                } else {
                    ""
                };
                return self
                    .styles
                    .error
                    .clone()
                    .render(&format!("Error: {}{}", err, hint));
            }
            LoadState::Idle | LoadState::Loaded => {}
        }

        if self.is_empty() {
            return self
                .styles
                .no_items
                .clone()
                .render(&format!("No {} found.", self.item_plural));
        }

        let window = self.window();
        let spacing = "\n".repeat(self.delegate.spacing());
        window
            .range()
            .map(|pos| {
                let item = &self.items[self.filtered[pos]];
                self.delegate.render(self, pos, item)
            })
            .filter(|row| !row.is_empty())
            .collect::<Vec<_>>()
            .join(&format!("\n{}", spacing))
    }

    pub(super) fn view_pagination(&self) -> String {
        let summary = self.styles.summary.clone().render(&self.summary());
        if self.total_pages() <= 1 {
            return summary;
        }
        let pages = self
            .styles
            .pagination_style
            .clone()
            .render(&self.paginator.view());
        format!("{}\n{}", pages, summary)
    }

    pub(super) fn view_footer(&self) -> String {
        self.styles
            .help_style
            .clone()
            .render(&self.help.view(self))
    }
}
