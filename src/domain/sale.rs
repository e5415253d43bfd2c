//! Orders, derived from the upstream `/carts` collection.
//!
//! The demo API has no order endpoint, so each cart is shown as an order with
//! a code such as `#ORD-007` and a status cycling through completed,
//! processing and pending.

use crate::error::FetchError;
use crate::filter::Filterable;
use crate::format::format_currency;
use crate::list::Record;
use crate::source::{DataSource, Resource, ResourceSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    /// Product id.
    pub id: u32,
    /// Product name.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Units bought.
    pub quantity: u32,
    /// `price * quantity`.
    pub total: f64,
    /// Discount in percent.
    #[serde(default)]
    pub discount_percentage: f64,
    /// Line total after discount.
    #[serde(default)]
    pub discounted_total: f64,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: String,
}

/// A cart from the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart id.
    pub id: u32,
    /// Lines.
    #[serde(default)]
    pub products: Vec<CartProduct>,
    /// Sum of line totals.
    pub total: f64,
    /// Sum after discounts.
    pub discounted_total: f64,
    /// Owner.
    pub user_id: u32,
    /// Distinct products.
    pub total_products: u32,
    /// Units over all lines.
    pub total_quantity: u32,
}

impl Resource for Cart {
    const PATH: &'static str = "/carts";
    const COLLECTION_KEY: &'static str = "carts";
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Paid and handed over.
    Completed,
    /// Being prepared.
    Processing,
    /// Not started.
    Pending,
}

impl SaleStatus {
    /// Status of the order at `index` in the cart listing.
    pub fn for_position(index: usize) -> Self {
        match index % 3 {
            0 => SaleStatus::Completed,
            1 => SaleStatus::Processing,
            _ => SaleStatus::Pending,
        }
    }

    /// Status key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Processing => "processing",
            SaleStatus::Pending => "pending",
        }
    }
}

/// A row of the sales page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Cart id.
    pub id: u32,
    /// `#ORD-001` style code.
    pub code: String,
    /// Customer label.
    pub customer: String,
    /// Distinct products.
    pub total_products: u32,
    /// Units.
    pub total_quantity: u32,
    /// Before discounts.
    pub total: f64,
    /// After discounts.
    pub discounted_total: f64,
    /// Fulfilment state.
    pub status: SaleStatus,
}

/// `#ORD-007` for cart 7.
pub fn order_code(cart_id: u32) -> String {
    format!("#ORD-{:03}", cart_id)
}

impl Sale {
    /// Builds the order for the cart at `index` in the listing.
    pub fn from_cart(cart: &Cart, index: usize) -> Self {
        Self {
            id: cart.id,
            code: order_code(cart.id),
            customer: format!("Customer {}", cart.user_id),
            total_products: cart.total_products,
            total_quantity: cart.total_quantity,
            total: cart.total,
            discounted_total: cart.discounted_total,
            status: SaleStatus::for_position(index),
        }
    }

    /// Amount taken off by discounts.
    pub fn discount(&self) -> f64 {
        self.total - self.discounted_total
    }
}

/// Orders for a whole cart listing, in listing order.
pub fn sales_from_carts(carts: &[Cart]) -> Vec<Sale> {
    carts
        .iter()
        .enumerate()
        .map(|(index, cart)| Sale::from_cart(cart, index))
        .collect()
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {} items  {}",
            self.code,
            self.customer,
            self.total_quantity,
            format_currency(self.discounted_total)
        )
    }
}

impl Filterable for Sale {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.code, &self.customer]
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        (key == "status").then(|| self.status.as_str())
    }
}

impl Record for Sale {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Fetches a page of carts and presents them as orders.
pub struct SaleSource {
    carts: ResourceSource<Cart>,
}

impl SaleSource {
    /// Wraps a cart source.
    pub fn new(carts: ResourceSource<Cart>) -> Self {
        Self { carts }
    }
}

#[async_trait]
impl DataSource<Sale> for SaleSource {
    async fn fetch(&self) -> Result<Vec<Sale>, FetchError> {
        let carts = self.carts.fetch().await?;
        Ok(sales_from_carts(&carts))
    }

    fn describe(&self) -> String {
        format!("sales from {}", self.carts.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, Criteria};
    use serde_json::json;

    fn cart(id: u32, user_id: u32, total: f64, discounted: f64) -> Cart {
        serde_json::from_value(json!({
            "id": id,
            "products": [{
                "id": 168, "title": "Charger SXT RWD", "price": 32999.99,
                "quantity": 3, "total": 98999.97,
                "discountPercentage": 13.39, "discountedTotal": 85743.87
            }],
            "total": total,
            "discountedTotal": discounted,
            "userId": user_id,
            "totalProducts": 1,
            "totalQuantity": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_cart_becomes_order() {
        let sale = Sale::from_cart(&cart(7, 33, 1000.0, 850.0), 4);
        assert_eq!(sale.code, "#ORD-007");
        assert_eq!(sale.customer, "Customer 33");
        assert_eq!(sale.status, SaleStatus::Processing);
        assert_eq!(sale.discount(), 150.0);
        assert_eq!(order_code(1234), "#ORD-1234");
    }

    #[test]
    fn test_status_cycles_by_position() {
        let carts: Vec<Cart> = (1..=6).map(|i| cart(i, i, 10.0, 9.0)).collect();
        let statuses: Vec<&str> = sales_from_carts(&carts)
            .iter()
            .map(|s| s.status.as_str())
            .collect();
        assert_eq!(
            statuses,
            ["completed", "processing", "pending", "completed", "processing", "pending"]
        );
    }

    #[test]
    fn test_search_by_code_or_customer() {
        let sales = sales_from_carts(&[cart(1, 5, 10.0, 9.0), cart(12, 15, 10.0, 9.0)]);
        assert_eq!(filter(&sales, &Criteria::search("ord-012"))[0].id, 12);
        assert_eq!(filter(&sales, &Criteria::search("customer 5")).len(), 1);
        let pending = Criteria::new().with_constraint("status", "pending");
        assert!(filter(&sales, &pending).is_empty());
    }
}
