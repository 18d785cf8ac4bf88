use crate::domain::{
    models::{order::{Order, OrderStatus, TopClient, TopSeller}, product::Product},
    ports::{DeletePlan, OrderRepository, UpdatePlan},
    services::stock::StockChange,
};
use crate::error::AppError;
use crate::infra::repositories::reservation_error;
use async_trait::async_trait;
use sqlx::{types::Json, SqliteConnection, SqlitePool};
use tracing::warn;

pub struct SqliteOrderRepo {
    pool: SqlitePool,
}

impl SqliteOrderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn apply_stock(conn: &mut SqliteConnection, changes: &[StockChange]) -> Result<(), AppError> {
    for change in changes {
        match change {
            StockChange::Reserve { product_id, quantity } => {
                let result = sqlx::query("UPDATE products SET stock = stock - ? WHERE id = ? AND stock >= ?")
                    .bind(quantity).bind(product_id).bind(quantity)
                    .execute(&mut *conn).await.map_err(AppError::Database)?;
                if result.rows_affected() == 0 {
                    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
                        .bind(product_id)
                        .fetch_optional(&mut *conn).await.map_err(AppError::Database)?;
                    return Err(reservation_error(product_id, *quantity, product));
                }
            }
            StockChange::Release { product_id, quantity } => {
                let result = sqlx::query("UPDATE products SET stock = stock + ? WHERE id = ?")
                    .bind(quantity).bind(product_id)
                    .execute(&mut *conn).await.map_err(AppError::Database)?;
                if result.rows_affected() == 0 {
                    warn!("Product {} no longer exists, {} units not restocked", product_id, quantity);
                }
            }
        }
    }
    Ok(())
}

/// Reads an order with the database write lock already held. The no-op update
/// runs first so the read cannot be overtaken by another writer before commit.
async fn lock_order(conn: &mut SqliteConnection, id: &str) -> Result<Option<Order>, AppError> {
    sqlx::query("UPDATE orders SET id = id WHERE id = ?")
        .bind(id)
        .execute(&mut *conn).await.map_err(AppError::Database)?;
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn).await.map_err(AppError::Database)
}

#[async_trait]
impl OrderRepository for SqliteOrderRepo {
    async fn create(&self, order: &Order, stock: &[StockChange]) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        apply_stock(&mut tx, stock).await?;
        let created = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, items, total, client_id, seller_id, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&order.id).bind(Json(&order.items)).bind(order.total).bind(&order.client_id)
            .bind(&order.seller_id).bind(order.status.as_str()).bind(order.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE seller_id = ? ORDER BY created_at ASC").bind(seller_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_seller_and_status(&self, seller_id: &str, status: OrderStatus) -> Result<Vec<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE seller_id = ? AND status = ? ORDER BY created_at ASC")
            .bind(seller_id).bind(status.as_str())
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, id: &str, plan: &UpdatePlan<'_>) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let current = lock_order(&mut tx, id).await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))?;
        let (order, stock) = plan(current)?;
        apply_stock(&mut tx, &stock).await?;
        let updated = sqlx::query_as::<_, Order>(
            "UPDATE orders SET items=?, total=?, client_id=?, status=?
             WHERE id=?
             RETURNING *"
        )
            .bind(Json(&order.items)).bind(order.total).bind(&order.client_id).bind(order.status.as_str())
            .bind(id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: &str, plan: &DeletePlan<'_>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let current = lock_order(&mut tx, id).await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))?;
        let stock = plan(&current)?;
        sqlx::query("DELETE FROM orders WHERE id = ?").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        apply_stock(&mut tx, &stock).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn top_clients(&self) -> Result<Vec<TopClient>, AppError> {
        sqlx::query_as::<_, TopClient>(
            "SELECT c.*, SUM(o.total) AS total
             FROM orders o JOIN clients c ON c.id = o.client_id
             WHERE o.status = 'COMPLETED'
             GROUP BY c.id
             ORDER BY total DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn top_sellers(&self, limit: i64) -> Result<Vec<TopSeller>, AppError> {
        sqlx::query_as::<_, TopSeller>(
            "SELECT u.*, SUM(o.total) AS total
             FROM orders o JOIN users u ON u.id = o.seller_id
             WHERE o.status = 'COMPLETED'
             GROUP BY u.id
             ORDER BY total DESC
             LIMIT ?"
        )
            .bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
