use std::sync::Arc;

use crate::domain::models::{
    order::{
        normalize_items, validate_total, Order, OrderInput, OrderStatus, OrderUpdateInput, TopClient,
        TopSeller,
    },
    user::User,
};
use crate::domain::ports::{ClientRepository, OrderRepository};
use crate::domain::services::{
    access::ensure_owner,
    stock::{rebalance, release_all, reserve_all, StockChange},
};
use crate::error::AppError;
use tracing::info;

pub const TOP_SELLERS_LIMIT: i64 = 5;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { orders, clients }
    }

    async fn owned_client(&self, caller: &User, client_id: &str) -> Result<(), AppError> {
        let client = self
            .clients
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;
        ensure_owner(caller, &client)
    }

    /// Places an order. Stock for every line item is reserved in the same
    /// transaction as the insert, so a rejected item leaves nothing behind.
    pub async fn create(&self, caller: &User, input: OrderInput) -> Result<Order, AppError> {
        validate_total(input.total)?;
        let items = normalize_items(input.items)?;
        self.owned_client(caller, &input.client_id).await?;

        let order = Order::new(
            items,
            input.total,
            input.client_id,
            caller.id.clone(),
            input.status.unwrap_or_default(),
        );
        let created = self.orders.create(&order, &reserve_all(&order.items)).await?;

        info!(
            "Seller {} placed order {} with {} line items",
            caller.id,
            created.id,
            created.items.len()
        );
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Order>, AppError> {
        self.orders.list().await
    }

    pub async fn list_for_seller(&self, caller: &User) -> Result<Vec<Order>, AppError> {
        self.orders.list_by_seller(&caller.id).await
    }

    pub async fn list_by_status(&self, caller: &User, status: OrderStatus) -> Result<Vec<Order>, AppError> {
        self.orders.list_by_seller_and_status(&caller.id, status).await
    }

    pub async fn get(&self, caller: &User, id: &str) -> Result<Order, AppError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))?;
        ensure_owner(caller, &order)?;
        Ok(order)
    }

    /// Merges the patch into the stored order. Replacing the line items moves
    /// only the stock difference between the stored and the incoming items,
    /// measured against the order as locked by the write.
    pub async fn update(&self, caller: &User, id: &str, patch: OrderUpdateInput) -> Result<Order, AppError> {
        self.get(caller, id).await?;

        let OrderUpdateInput { items, total, client_id, status } = patch;
        if let Some(client_id) = &client_id {
            self.owned_client(caller, client_id).await?;
        }
        if let Some(total) = total {
            validate_total(total)?;
        }
        let items = items.map(normalize_items).transpose()?;

        let plan = |mut order: Order| -> Result<(Order, Vec<StockChange>), AppError> {
            ensure_owner(caller, &order)?;
            if let Some(client_id) = &client_id {
                order.client_id = client_id.clone();
            }
            if let Some(total) = total {
                order.total = total;
            }
            if let Some(status) = status {
                order.status = status;
            }
            let stock = match &items {
                Some(items) => {
                    let changes = rebalance(&order.items, items);
                    order.items = items.clone();
                    changes
                }
                None => Vec::new(),
            };
            Ok((order, stock))
        };

        let updated = self.orders.update(id, &plan).await?;
        info!("Seller {} updated order {} ({:?})", caller.id, updated.id, updated.status);
        Ok(updated)
    }

    /// Hard-deletes the order. Stock comes back unless the order was completed
    /// at the moment of deletion.
    pub async fn delete(&self, caller: &User, id: &str) -> Result<(), AppError> {
        self.get(caller, id).await?;

        let plan = |order: &Order| -> Result<Vec<StockChange>, AppError> {
            ensure_owner(caller, order)?;
            Ok(if order.status == OrderStatus::Completed {
                Vec::new()
            } else {
                release_all(&order.items)
            })
        };
        self.orders.delete(id, &plan).await?;

        info!("Seller {} deleted order {}", caller.id, id);
        Ok(())
    }

    pub async fn top_clients(&self) -> Result<Vec<TopClient>, AppError> {
        self.orders.top_clients().await
    }

    pub async fn top_sellers(&self) -> Result<Vec<TopSeller>, AppError> {
        self.orders.top_sellers(TOP_SELLERS_LIMIT).await
    }
}
