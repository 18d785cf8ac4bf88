use crate::domain::{models::product::Product, ports::ProductRepository};
use crate::error::AppError;
use crate::infra::repositories::like_pattern;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteProductRepo {
    pool: SqlitePool,
}

impl SqliteProductRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepo {
    async fn create(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name, stock, price, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&product.id)
            .bind(&product.name)
            .bind(product.stock)
            .bind(product.price)
            .bind(product.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn search(&self, text: &str, limit: i64) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE name LIKE ? ESCAPE '\\' ORDER BY name ASC LIMIT ?"
        )
            .bind(like_pattern(text))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name=?, stock=?, price=? WHERE id=? RETURNING *"
        )
            .bind(&product.name)
            .bind(product.stock)
            .bind(product.price)
            .bind(&product.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".into()));
        }
        Ok(())
    }
}
