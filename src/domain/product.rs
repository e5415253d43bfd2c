//! Catalogue products, as served by `/products`.

use super::StockLevel;
use crate::error::{require, ValidationError};
use crate::filter::Filterable;
use crate::format::{calculate_discount, format_currency};
use crate::list::{Draft, Record};
use crate::source::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock below this many units counts as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Upstream id.
    pub id: u32,
    /// Product name.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// List price in baht.
    pub price: f64,
    /// Discount in percent.
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Brand, when the product has one.
    #[serde(default)]
    pub brand: Option<String>,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Gallery URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Price after the product's discount.
    pub fn discounted_price(&self) -> f64 {
        calculate_discount(self.price, self.discount_percentage)
    }

    /// Stock classification against [`LOW_STOCK_THRESHOLD`].
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock, LOW_STOCK_THRESHOLD)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(brand) = &self.brand {
            write!(f, " · {}", brand)?;
        }
        write!(
            f,
            "  {}  ({} left)",
            format_currency(self.discounted_price()),
            self.stock
        )
    }
}

impl Filterable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.category.as_str()];
        if let Some(brand) = &self.brand {
            fields.push(brand.as_str());
        }
        fields
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "category" => Some(self.category.as_str()),
            "brand" => self.brand.as_deref(),
            "status" => Some(self.stock_level().as_str()),
            _ => None,
        }
    }
}

impl Record for Product {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.stock_level().as_str())
    }
}

impl Resource for Product {
    const PATH: &'static str = "/products";
    const COLLECTION_KEY: &'static str = "products";
}

/// A product entered by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    /// Product name; required.
    pub title: String,
    /// Category slug; required.
    pub category: String,
    /// Optional brand.
    pub brand: Option<String>,
    /// List price; must be a non-negative number.
    pub price: f64,
    /// Opening stock.
    pub stock: u32,
}

impl Draft<Product> for ProductDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::Invalid {
                field: "price",
                reason: "must be zero or more".to_string(),
            });
        }
        Ok(())
    }

    fn into_record(self, id: u32) -> Product {
        Product {
            id,
            title: self.title.trim().to_string(),
            description: String::new(),
            price: self.price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: self.stock,
            brand: self.brand.filter(|b| !b.trim().is_empty()),
            category: self.category.trim().to_string(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, Criteria};
    use serde_json::json;

    fn sample() -> Product {
        serde_json::from_value(json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "category": "beauty"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserializes_camel_case_and_defaults() {
        let p = sample();
        assert_eq!(p.discount_percentage, 7.17);
        assert!(p.images.is_empty());
        assert_eq!(p.description, "");

        let no_brand: Product = serde_json::from_value(json!({
            "id": 2, "title": "Apple", "price": 1.99, "category": "groceries"
        }))
        .unwrap();
        assert_eq!(no_brand.brand, None);
        assert_eq!(no_brand.stock_level(), StockLevel::OutOfStock);
    }

    #[test]
    fn test_status_follows_stock() {
        let mut p = sample();
        assert_eq!(Record::status(&p), Some("low_stock"));
        p.stock = 99;
        assert_eq!(Record::status(&p), Some("in_stock"));
    }

    #[test]
    fn test_search_and_category_filter() {
        let products = vec![sample()];
        assert_eq!(filter(&products, &Criteria::search("essence")).len(), 1);
        assert_eq!(filter(&products, &Criteria::search("BEAUTY")).len(), 1);
        let c = Criteria::new().with_constraint("category", "groceries");
        assert!(filter(&products, &c).is_empty());
    }

    #[test]
    fn test_discounted_price() {
        let mut p = sample();
        p.price = 200.0;
        p.discount_percentage = 10.0;
        assert_eq!(p.discounted_price(), 180.0);
        assert!(p.to_string().contains("฿180"));
    }

    #[test]
    fn test_draft_validation() {
        let draft = ProductDraft {
            title: "Thai Iced Tea".into(),
            category: "beverages".into(),
            price: -1.0,
            ..ProductDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().field(), "price");

        let draft = ProductDraft {
            price: 45.0,
            ..draft
        };
        assert!(draft.validate().is_ok());
        let product = draft.into_record(7);
        assert_eq!(product.id, 7);
        assert_eq!(product.brand, None);
    }
}
