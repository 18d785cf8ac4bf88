use crate::domain::{models::product::Product, ports::ProductRepository};
use crate::error::AppError;
use crate::infra::repositories::like_pattern;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresProductRepo {
    pool: PgPool,
}

impl PostgresProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepo {
    async fn create(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name, stock, price, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
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
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn search(&self, text: &str, limit: i64) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE name ILIKE $1 ESCAPE '\\' ORDER BY name ASC LIMIT $2"
        )
            .bind(like_pattern(text))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name=$1, stock=$2, price=$3 WHERE id=$4 RETURNING *"
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
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
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
