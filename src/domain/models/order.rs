use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{client::Client, user::User};
use crate::error::AppError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(AppError::InternalWithMsg(format!("Unknown order status in store: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Order {
    pub id: String,
    #[sqlx(json)]
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub client_id: String,
    pub seller_id: String,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(items: Vec<OrderItem>, total: f64, client_id: String, seller_id: String, status: OrderStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            items,
            total,
            client_id,
            seller_id,
            status,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, InputObject)]
pub struct OrderInput {
    pub items: Vec<OrderItemInput>,
    pub total: f64,
    pub client_id: String,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Default, InputObject)]
pub struct OrderUpdateInput {
    pub items: Option<Vec<OrderItemInput>>,
    pub total: Option<f64>,
    pub client_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Validates line items and folds repeated products into a single entry,
/// keeping the order in which products first appear.
pub fn normalize_items(inputs: Vec<OrderItemInput>) -> Result<Vec<OrderItem>, AppError> {
    if inputs.is_empty() {
        return Err(AppError::Validation("An order needs at least one line item".into()));
    }

    let mut items: Vec<OrderItem> = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.quantity <= 0 {
            return Err(AppError::Validation(format!(
                "Quantity for product {} must be positive",
                input.product_id
            )));
        }
        match items.iter_mut().find(|item| item.product_id == input.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(input.quantity).ok_or_else(|| {
                    AppError::Validation(format!("Quantity for product {} is too large", input.product_id))
                })?;
            }
            None => items.push(OrderItem {
                product_id: input.product_id,
                quantity: input.quantity,
            }),
        }
    }
    Ok(items)
}

pub fn validate_total(total: f64) -> Result<(), AppError> {
    if !total.is_finite() || total < 0.0 {
        return Err(AppError::Validation("Order total must be a non-negative number".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, FromRow, SimpleObject)]
pub struct TopClient {
    pub total: f64,
    #[sqlx(flatten)]
    pub client: Client,
}

#[derive(Debug, Clone, FromRow, SimpleObject)]
pub struct TopSeller {
    pub total: f64,
    #[sqlx(flatten)]
    pub seller: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i32) -> OrderItemInput {
        OrderItemInput { product_id: product_id.to_string(), quantity }
    }

    #[test]
    fn merges_repeated_products() {
        let items = normalize_items(vec![item("a", 2), item("b", 1), item("a", 3)]).unwrap();
        assert_eq!(
            items,
            vec![
                OrderItem { product_id: "a".into(), quantity: 5 },
                OrderItem { product_id: "b".into(), quantity: 1 },
            ]
        );
    }

    #[test]
    fn rejects_empty_and_non_positive_items() {
        assert!(matches!(normalize_items(vec![]), Err(AppError::Validation(_))));
        assert!(matches!(normalize_items(vec![item("a", 0)]), Err(AppError::Validation(_))));
        assert!(matches!(normalize_items(vec![item("a", -4)]), Err(AppError::Validation(_))));
    }

    #[test]
    fn status_round_trips_through_store_text() {
        for status in [OrderStatus::Pending, OrderStatus::Completed, OrderStatus::Cancelled] {
            assert_eq!(OrderStatus::try_from(status.as_str().to_string()).unwrap(), status);
        }
        assert!(OrderStatus::try_from("SHIPPED".to_string()).is_err());
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn total_must_be_non_negative() {
        assert!(validate_total(0.0).is_ok());
        assert!(validate_total(120.5).is_ok());
        assert!(validate_total(-1.0).is_err());
        assert!(validate_total(f64::NAN).is_err());
    }
}
