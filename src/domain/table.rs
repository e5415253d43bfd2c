//! Restaurant floor: dining tables and their local state changes.
//!
//! State changes happen in place with no server round trip. Each one checks
//! the table's current status and rejects moves that make no sense, such as
//! seating guests at an occupied table.

use crate::error::ValidationError;
use crate::filter::Filterable;
use crate::format::format_currency;
use crate::list::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Free.
    #[default]
    Available,
    /// Guests seated, bill open.
    Occupied,
    /// Held for a named guest.
    Reserved,
}

impl TableStatus {
    /// Status key.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

/// A table on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    /// Row id.
    pub id: u32,
    /// Label such as `A1`; the letter is the zone.
    pub number: String,
    /// Seats.
    pub capacity: u8,
    /// Occupancy.
    pub status: TableStatus,
    /// Open bill while occupied.
    pub current_bill: Option<f64>,
    /// Minutes since the guests sat down.
    pub occupied_minutes: Option<u32>,
    /// Guest on the reservation or the bill.
    pub customer_name: Option<String>,
}

fn wrong_status(table: &DiningTable, wanted: &str) -> ValidationError {
    ValidationError::Invalid {
        field: "status",
        reason: format!("table {} is {}, expected {}", table.number, table.status.as_str(), wanted),
    }
}

impl DiningTable {
    /// A free table.
    pub fn new(id: u32, number: &str, capacity: u8) -> Self {
        Self {
            id,
            number: number.to_string(),
            capacity,
            status: TableStatus::Available,
            current_bill: None,
            occupied_minutes: None,
            customer_name: None,
        }
    }

    /// Zone letter, e.g. `A` for table `A3`.
    pub fn zone(&self) -> &str {
        self.number
            .char_indices()
            .nth(1)
            .map_or(self.number.as_str(), |(end, _)| &self.number[..end])
    }

    /// Seats guests at an available or reserved table and opens an empty
    /// bill. A reserved table keeps the reservation name unless `customer`
    /// is given.
    pub fn seat(&mut self, customer: Option<&str>) -> Result<(), ValidationError> {
        if self.status == TableStatus::Occupied {
            return Err(wrong_status(self, "available or reserved"));
        }
        if let Some(name) = customer.map(str::trim).filter(|n| !n.is_empty()) {
            self.customer_name = Some(name.to_string());
        }
        self.status = TableStatus::Occupied;
        self.current_bill = Some(0.0);
        self.occupied_minutes = Some(0);
        Ok(())
    }

    /// Holds an available table for `customer`.
    pub fn reserve(&mut self, customer: &str) -> Result<(), ValidationError> {
        crate::error::require("customer", customer)?;
        if self.status != TableStatus::Available {
            return Err(wrong_status(self, "available"));
        }
        self.status = TableStatus::Reserved;
        self.customer_name = Some(customer.trim().to_string());
        Ok(())
    }

    /// Adds `amount` to the open bill.
    pub fn add_to_bill(&mut self, amount: f64) -> Result<(), ValidationError> {
        if self.status != TableStatus::Occupied {
            return Err(wrong_status(self, "occupied"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::Invalid {
                field: "amount",
                reason: "must be a positive number".to_string(),
            });
        }
        *self.current_bill.get_or_insert(0.0) += amount;
        Ok(())
    }

    /// Closes the bill and frees the table. Returns the amount settled.
    pub fn checkout(&mut self) -> Result<f64, ValidationError> {
        if self.status != TableStatus::Occupied {
            return Err(wrong_status(self, "occupied"));
        }
        let settled = self.current_bill.take().unwrap_or(0.0);
        self.status = TableStatus::Available;
        self.occupied_minutes = None;
        self.customer_name = None;
        Ok(settled)
    }
}

impl fmt::Display for DiningTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {} ({} seats)", self.number, self.capacity)?;
        if let Some(name) = &self.customer_name {
            write!(f, "  {}", name)?;
        }
        if let Some(bill) = self.current_bill {
            write!(f, "  {}", format_currency(bill))?;
        }
        if let Some(minutes) = self.occupied_minutes {
            write!(f, "  {} min", minutes)?;
        }
        Ok(())
    }
}

impl Filterable for DiningTable {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.number.as_str()];
        if let Some(name) = &self.customer_name {
            fields.push(name.as_str());
        }
        fields
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "status" => Some(self.status.as_str()),
            "zone" => Some(self.zone()),
            _ => None,
        }
    }
}

impl Record for DiningTable {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Header counts for the floor plan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TableStats {
    /// Free tables.
    pub available: usize,
    /// Tables with guests.
    pub occupied: usize,
    /// Held tables.
    pub reserved: usize,
    /// Sum of all open bills.
    pub open_bills: f64,
    /// Seats at free tables.
    pub free_seats: u32,
}

impl TableStats {
    /// Counts over the whole floor.
    pub fn from_tables(tables: &[DiningTable]) -> Self {
        tables.iter().fold(Self::default(), |mut acc, t| {
            match t.status {
                TableStatus::Available => {
                    acc.available += 1;
                    acc.free_seats += u32::from(t.capacity);
                }
                TableStatus::Occupied => acc.occupied += 1,
                TableStatus::Reserved => acc.reserved += 1,
            }
            acc.open_bills += t.current_bill.unwrap_or(0.0);
            acc
        })
    }
}
