//! Stock keeping units and their levels.

use super::StockLevel;
use crate::error::{require, ValidationError};
use crate::filter::Filterable;
use crate::list::{Draft, Patch, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stocked item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Row id.
    pub id: u32,
    /// Stock keeping unit, e.g. `SKU-0042`.
    pub sku: String,
    /// Item name.
    pub name: String,
    /// Shelf category.
    pub category: String,
    /// Units on hand.
    pub quantity: u32,
    /// Reorder when the quantity drops below this.
    pub reorder_level: u32,
    /// Purchase cost per unit in baht.
    pub unit_cost: f64,
}

impl InventoryItem {
    /// Level of this item against its own reorder threshold.
    pub fn level(&self) -> StockLevel {
        StockLevel::classify(self.quantity, self.reorder_level)
    }

    /// Cost of the units on hand.
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.unit_cost
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  [{}]  {} on hand (reorder at {})",
            self.sku, self.name, self.category, self.quantity, self.reorder_level
        )
    }
}

impl Filterable for InventoryItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.sku, &self.name, &self.category]
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "category" => Some(self.category.as_str()),
            "status" => Some(self.level().as_str()),
            _ => None,
        }
    }
}

impl Record for InventoryItem {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.level().as_str())
    }
}

/// Counts for the inventory header cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventorySummary {
    /// Distinct items.
    pub total_items: usize,
    /// Units over all items.
    pub total_units: u64,
    /// Items below their reorder level.
    pub low_stock: usize,
    /// Items with nothing left.
    pub out_of_stock: usize,
    /// Cost of everything on hand.
    pub stock_value: f64,
}

impl InventorySummary {
    /// Summarises the whole collection.
    pub fn from_items(items: &[InventoryItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.total_items += 1;
            acc.total_units += u64::from(item.quantity);
            acc.stock_value += item.stock_value();
            match item.level() {
                StockLevel::LowStock => acc.low_stock += 1,
                StockLevel::OutOfStock => acc.out_of_stock += 1,
                StockLevel::InStock => {}
            }
            acc
        })
    }
}

/// Adds received units to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restock(pub u32);

impl Patch<InventoryItem> for Restock {
    fn apply(self, item: &mut InventoryItem) {
        item.quantity = item.quantity.saturating_add(self.0);
    }
}

/// A new stock line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryDraft {
    /// Required, must be unique in practice.
    pub sku: String,
    /// Required.
    pub name: String,
    /// Required.
    pub category: String,
    /// Opening quantity.
    pub quantity: u32,
    /// Reorder threshold.
    pub reorder_level: u32,
    /// Cost per unit; must be a non-negative number.
    pub unit_cost: f64,
}

impl Draft<InventoryItem> for InventoryDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("sku", &self.sku)?;
        require("name", &self.name)?;
        require("category", &self.category)?;
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(ValidationError::Invalid {
                field: "unit_cost",
                reason: "must be zero or more".to_string(),
            });
        }
        Ok(())
    }

    fn into_record(self, id: u32) -> InventoryItem {
        InventoryItem {
            id,
            sku: self.sku.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity,
            reorder_level: self.reorder_level,
            unit_cost: self.unit_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListView;

    fn item(id: u32, quantity: u32, reorder_level: u32) -> InventoryItem {
        InventoryItem {
            id,
            sku: format!("SKU-{:04}", id),
            name: format!("Item {}", id),
            category: if id % 2 == 0 { "Sauces" } else { "Rice" }.to_string(),
            quantity,
            reorder_level,
            unit_cost: 10.0,
        }
    }

    #[test]
    fn test_summary_counts_levels() {
        let items = vec![item(1, 0, 5), item(2, 3, 5), item(3, 50, 5), item(4, 5, 5)];
        let summary = InventorySummary::from_items(&items);
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.total_units, 58);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.stock_value, 580.0);
    }

    #[test]
    fn test_restock_moves_item_out_of_low_stock() {
        let mut view = ListView::new(vec![item(1, 2, 10), item(2, 40, 10)], 10);
        assert_eq!(view.stats().count("low_stock"), 1);

        assert!(view.update_item(&1, Restock(20)));
        assert_eq!(view.get(&1).map(|i| i.quantity), Some(22));
        assert_eq!(view.stats().count("low_stock"), 0);
        assert_eq!(view.stats().count("in_stock"), 2);
    }

    #[test]
    fn test_filter_by_category_and_level() {
        let mut view = ListView::new((1..=6).map(|i| item(i, i * 2, 5)).collect(), 10);
        view.set_constraint("category", "Sauces");
        assert_eq!(view.len(), 3);
        view.set_constraint("status", "low_stock");
        // item 2 has 4 units
        assert_eq!(view.filtered_items()[0].id, 2);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_draft_normalises_sku() {
        let draft = InventoryDraft {
            sku: " sku-0100 ".into(),
            name: "Fish Sauce".into(),
            category: "Sauces".into(),
            quantity: 12,
            reorder_level: 6,
            unit_cost: 35.0,
        };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.into_record(100).sku, "SKU-0100");

        let missing = InventoryDraft::default();
        assert_eq!(missing.validate().unwrap_err().field(), "sku");
    }
}
