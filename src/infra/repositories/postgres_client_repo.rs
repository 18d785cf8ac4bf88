use crate::domain::{models::client::Client, ports::ClientRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepo {
    async fn create(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (id, first_name, last_name, company, email, phone, seller_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&client.id).bind(&client.first_name).bind(&client.last_name).bind(&client.company)
            .bind(&client.email).bind(&client.phone).bind(&client.seller_id).bind(client.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE email = $1").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE seller_id = $1 ORDER BY created_at ASC").bind(seller_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET first_name=$1, last_name=$2, company=$3, email=$4, phone=$5
             WHERE id=$6
             RETURNING *"
        )
            .bind(&client.first_name).bind(&client.last_name).bind(&client.company)
            .bind(&client.email).bind(&client.phone)
            .bind(&client.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Client not found".into())); }
        Ok(())
    }
}
