//! Totals for the dashboard landing page.

use super::product::Product;
use super::sale::{order_code, Cart, SaleStatus};
use crate::error::FetchError;
use crate::format::format_currency;
use crate::source::{ApiClient, Paged};

/// Number of orders shown under "recent orders".
pub const RECENT_ORDERS: usize = 5;

/// The four headline figures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// Products in the catalogue.
    pub total_products: usize,
    /// Orders ever placed.
    pub total_orders: usize,
    /// Sum of cart totals before discounts.
    pub total_revenue: f64,
    /// Sum of cart totals after discounts.
    pub total_sales: f64,
}

impl Summary {
    /// Computes the figures from one page of products and one page of carts.
    /// Counts come from the upstream totals, amounts from the carts on the
    /// page.
    pub fn from_pages(products: &Paged<Product>, carts: &Paged<Cart>) -> Self {
        Self {
            total_products: products.total,
            total_orders: carts.total,
            total_revenue: carts.items.iter().map(|c| c.total).sum(),
            total_sales: carts.items.iter().map(|c| c.discounted_total).sum(),
        }
    }
}

/// A row of the recent orders table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentOrder {
    /// `#ORD-001` style code.
    pub code: String,
    /// Customer label.
    pub customer: String,
    /// Amount after discounts.
    pub amount: f64,
    /// Fulfilment state.
    pub status: SaleStatus,
    /// Minutes since the order was placed.
    pub minutes_ago: u32,
}

impl RecentOrder {
    /// Formatted amount.
    pub fn amount_label(&self) -> String {
        format_currency(self.amount)
    }

    /// "15 min ago".
    pub fn time_label(&self) -> String {
        format!("{} min ago", self.minutes_ago)
    }
}

/// The first [`RECENT_ORDERS`] carts as recent orders, five minutes apart.
pub fn recent_orders(carts: &[Cart]) -> Vec<RecentOrder> {
    carts
        .iter()
        .take(RECENT_ORDERS)
        .enumerate()
        .map(|(index, cart)| RecentOrder {
            code: order_code(cart.id),
            customer: format!("Customer {}", cart.user_id),
            amount: cart.discounted_total,
            status: SaleStatus::for_position(index),
            minutes_ago: (index as u32 + 1) * 5,
        })
        .collect()
}

/// Everything the landing page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Headline figures.
    pub summary: Summary,
    /// Latest orders.
    pub recent_orders: Vec<RecentOrder>,
}

impl Dashboard {
    /// Builds the page from already fetched data.
    pub fn from_pages(products: &Paged<Product>, carts: &Paged<Cart>) -> Self {
        Self {
            summary: Summary::from_pages(products, carts),
            recent_orders: recent_orders(&carts.items),
        }
    }

    /// Fetches 100 products and 20 carts and builds the page.
    pub async fn fetch(client: &ApiClient) -> Result<Self, FetchError> {
        let products = client.fetch_page::<Product>(100, 0).await?;
        let carts = client.fetch_page::<Cart>(20, 0).await?;
        tracing::info!(
            products = products.total,
            carts = carts.items.len(),
            "dashboard loaded"
        );
        Ok(Self::from_pages(&products, &carts))
    }
}
