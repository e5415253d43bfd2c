//! The kitchen display: open orders per table.
//!
//! Orders move pending → preparing → ready and leave the queue when served.
//! How long an order has waited decides its [`Urgency`].

use crate::filter::Filterable;
use crate::list::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes after which an order is flagged as late.
pub const LATE_AFTER_MINUTES: i64 = 15;
/// Minutes after which an order gets a warning.
pub const WARN_AFTER_MINUTES: i64 = 10;

/// Progress of an order in the kitchen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KitchenStatus {
    /// Not started.
    #[default]
    Pending,
    /// On the stove.
    Preparing,
    /// Waiting to be served.
    Ready,
}

impl KitchenStatus {
    /// Status key.
    pub fn as_str(&self) -> &'static str {
        match self {
            KitchenStatus::Pending => "pending",
            KitchenStatus::Preparing => "preparing",
            KitchenStatus::Ready => "ready",
        }
    }

    /// The following status, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            KitchenStatus::Pending => Some(KitchenStatus::Preparing),
            KitchenStatus::Preparing => Some(KitchenStatus::Ready),
            KitchenStatus::Ready => None,
        }
    }
}

/// Order priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// First come, first served.
    #[default]
    Normal,
    /// Jumps the queue.
    High,
}

impl Priority {
    /// Priority key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

/// How long an order has been waiting, as a traffic light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    /// Within time.
    OnTime,
    /// More than [`WARN_AFTER_MINUTES`].
    Warning,
    /// More than [`LATE_AFTER_MINUTES`].
    Late,
}

impl Urgency {
    /// Classifies a wait in whole minutes.
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes > LATE_AFTER_MINUTES {
            Urgency::Late
        } else if minutes > WARN_AFTER_MINUTES {
            Urgency::Warning
        } else {
            Urgency::OnTime
        }
    }
}

/// One dish on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Dish name.
    pub name: String,
    /// Portions.
    pub quantity: u32,
    /// Instructions for the cook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderLine {
    /// A line without notes.
    pub fn new(name: &str, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            notes: None,
        }
    }

    /// Attaches cook's notes.
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// An order on the kitchen display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenOrder {
    /// Order id.
    pub id: u32,
    /// Table the order belongs to.
    pub table_number: String,
    /// Dishes.
    pub items: Vec<OrderLine>,
    /// Progress.
    pub status: KitchenStatus,
    /// When the order reached the kitchen.
    pub placed_at: DateTime<Utc>,
    /// Priority.
    pub priority: Priority,
}

impl KitchenOrder {
    /// Moves the order one step along. Returns false if it was already
    /// ready.
    pub fn advance(&mut self) -> bool {
        match self.status.next() {
            Some(next) => {
                self.status = next;
                true
            }
            None => false,
        }
    }

    /// Whole minutes waited as of `now`.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.placed_at).num_minutes().max(0)
    }

    /// Urgency as of `now`.
    pub fn urgency(&self, now: DateTime<Utc>) -> Urgency {
        Urgency::from_minutes(self.elapsed_minutes(now))
    }

    /// Portions over all lines.
    pub fn portions(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

impl fmt::Display for KitchenOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|line| match &line.notes {
                Some(notes) => format!("{} x{} ({})", line.name, line.quantity, notes),
                None => format!("{} x{}", line.name, line.quantity),
            })
            .collect();
        let flag = if self.priority == Priority::High { " !" } else { "" };
        write!(f, "Table {}{}  {}", self.table_number, flag, lines.join(", "))
    }
}

impl Filterable for KitchenOrder {
    fn search_fields(&self) -> Vec<&str> {
        std::iter::once(self.table_number.as_str())
            .chain(self.items.iter().map(|line| line.name.as_str()))
            .collect()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            _ => None,
        }
    }
}

impl Record for KitchenOrder {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListView;
    use crate::mock::MockGenerator;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 19, 30, 0).unwrap()
    }

    #[test]
    fn test_advance_stops_at_ready() {
        let mut order = MockGenerator::kitchen_queue(now()).remove(0);
        assert_eq!(order.status, KitchenStatus::Pending);
        assert!(order.advance());
        assert_eq!(order.status, KitchenStatus::Preparing);
        assert!(order.advance());
        assert!(!order.advance());
        assert_eq!(order.status, KitchenStatus::Ready);
    }

    #[test]
    fn test_urgency_thresholds() {
        assert_eq!(Urgency::from_minutes(10), Urgency::OnTime);
        assert_eq!(Urgency::from_minutes(11), Urgency::Warning);
        assert_eq!(Urgency::from_minutes(15), Urgency::Warning);
        assert_eq!(Urgency::from_minutes(16), Urgency::Late);

        let queue = MockGenerator::kitchen_queue(now());
        let urgencies: Vec<Urgency> = queue.iter().map(|o| o.urgency(now())).collect();
        assert_eq!(
            urgencies,
            [Urgency::OnTime, Urgency::Warning, Urgency::OnTime, Urgency::Warning]
        );
        // an hour later everything is late
        let later = now() + Duration::hours(1);
        assert!(queue.iter().all(|o| o.urgency(later) == Urgency::Late));
    }

    #[test]
    fn test_serving_removes_order() {
        let mut view = ListView::new(MockGenerator::kitchen_queue(now()), 10);
        assert_eq!(view.stats().count("preparing"), 2);

        assert!(view.update_item(&1, |o: &mut KitchenOrder| {
            o.advance();
        }));
        assert_eq!(view.stats().count("preparing"), 3);

        let served = view.remove_item(&4).unwrap();
        assert_eq!(served.status, KitchenStatus::Ready);
        assert_eq!(view.stats().total, 3);
    }

    #[test]
    fn test_search_by_table_or_dish() {
        let mut view = ListView::new(MockGenerator::kitchen_queue(now()), 10);
        view.set_search("c3");
        assert_eq!(view.len(), 1);
        view.set_search("tom yum");
        assert_eq!(view.len(), 2);
        view.set_filter(crate::filter::Criteria::new().with_constraint("priority", "high"));
        assert_eq!(view.filtered_items()[0].table_number, "A2");
        assert_eq!(view.filtered_items()[0].portions(), 3);
    }
}
