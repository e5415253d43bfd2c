//! The customer directory.

use crate::error::{require, ValidationError};
use crate::filter::Filterable;
use crate::format::format_currency;
use crate::list::{Draft, Record};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a customer is still buying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Ordered recently.
    #[default]
    Active,
    /// Dormant.
    Inactive,
}

impl CustomerStatus {
    /// Status key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Directory id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
    /// Mobile number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Orders placed so far.
    pub total_orders: u32,
    /// Lifetime spend in baht.
    pub total_spent: f64,
    /// Registration date.
    pub join_date: NaiveDate,
    /// Activity status.
    pub status: CustomerStatus,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}  {} orders  {}",
            self.name,
            self.email,
            self.phone,
            self.total_orders,
            format_currency(self.total_spent)
        )
    }
}

impl Filterable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.phone]
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        (key == "status").then(|| self.status.as_str())
    }
}

impl Record for Customer {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// The "add customer" form.
///
/// New customers start active, with no orders, joined today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    /// Required.
    pub name: String,
    /// Required, must contain `@`.
    pub email: String,
    /// Required.
    pub phone: String,
    /// Optional.
    pub address: String,
}

impl Draft<Customer> for CustomerDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        if !self.email.contains('@') {
            return Err(ValidationError::Invalid {
                field: "email",
                reason: "must contain @".to_string(),
            });
        }
        Ok(())
    }

    fn into_record(self, id: u32) -> Customer {
        Customer {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            total_orders: 0,
            total_spent: 0.0,
            join_date: Local::now().date_naive(),
            status: CustomerStatus::Active,
        }
    }
}
