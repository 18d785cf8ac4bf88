use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, SimpleObject)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub stock: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, stock: i32, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            stock,
            price,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::Validation("Product name must not be empty".into()));
        }
        if self.stock < 0 {
            return Err(AppError::Validation("Product stock must not be negative".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::Validation("Product price must be a non-negative number".into()));
        }
        Ok(())
    }

    pub fn apply(&mut self, patch: ProductUpdateInput) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

#[derive(Debug, InputObject)]
pub struct ProductInput {
    pub name: String,
    pub stock: i32,
    pub price: f64,
}

#[derive(Debug, Default, InputObject)]
pub struct ProductUpdateInput {
    pub name: Option<String>,
    pub stock: Option<i32>,
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_stock_and_price() {
        assert!(Product::new("Laptop".into(), 10, 999.0).validate().is_ok());
        assert!(matches!(Product::new("Laptop".into(), -1, 999.0).validate(), Err(AppError::Validation(_))));
        assert!(matches!(Product::new("Laptop".into(), 1, -0.5).validate(), Err(AppError::Validation(_))));
        assert!(matches!(Product::new("   ".into(), 1, 1.0).validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut product = Product::new("Laptop".into(), 10, 999.0);
        product.apply(ProductUpdateInput { stock: Some(4), ..Default::default() });
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.stock, 4);
        assert_eq!(product.price, 999.0);
    }
}
