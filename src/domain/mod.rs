//! Records shown by the dashboard views.
//!
//! Every record implements [`crate::list::Record`] and
//! [`crate::filter::Filterable`] with the search fields its page offers.
//! Records served by the upstream API also implement
//! [`crate::source::Resource`].

pub mod customer;
pub mod inventory;
pub mod kitchen;
pub mod product;
pub mod sale;
pub mod summary;
pub mod table;
pub mod user;

pub use customer::{Customer, CustomerDraft, CustomerStatus};
pub use inventory::{InventoryDraft, InventoryItem, InventorySummary, Restock};
pub use kitchen::{KitchenOrder, KitchenStatus, OrderLine, Priority, Urgency};
pub use product::{Product, ProductDraft};
pub use sale::{Cart, CartProduct, Sale, SaleSource, SaleStatus};
pub use summary::{Dashboard, RecentOrder, Summary};
pub use table::{DiningTable, TableStats, TableStatus};
pub use user::ApiUser;

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of something is left on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// Above the reorder threshold.
    InStock,
    /// At or below the reorder threshold but not empty.
    LowStock,
    /// Nothing left.
    OutOfStock,
}

impl StockLevel {
    /// Classifies `quantity` against a reorder threshold. Anything strictly
    /// below `threshold` is low.
    pub fn classify(quantity: u32, threshold: u32) -> Self {
        match quantity {
            0 => StockLevel::OutOfStock,
            q if q < threshold => StockLevel::LowStock,
            _ => StockLevel::InStock,
        }
    }

    /// The status key used for filtering and stats.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::InStock => "in_stock",
            StockLevel::LowStock => "low_stock",
            StockLevel::OutOfStock => "out_of_stock",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(StockLevel::classify(0, 10), StockLevel::OutOfStock);
        assert_eq!(StockLevel::classify(9, 10), StockLevel::LowStock);
        assert_eq!(StockLevel::classify(10, 10), StockLevel::InStock);
        assert_eq!(StockLevel::LowStock.to_string(), "low stock");
    }
}
