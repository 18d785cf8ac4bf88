use std::sync::Arc;

use crate::domain::models::product::{Product, ProductInput, ProductUpdateInput};
use crate::domain::ports::ProductRepository;
use crate::error::AppError;
use tracing::info;

pub const SEARCH_LIMIT: i64 = 10;

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product, AppError> {
        let product = Product::new(input.name, input.stock, input.price);
        product.validate()?;

        let created = self.repo.create(&product).await?;
        info!("Created product {} with stock {}", created.id, created.stock);
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Product, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    pub async fn search(&self, text: &str) -> Result<Vec<Product>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.search(text, SEARCH_LIMIT).await
    }

    pub async fn update(&self, id: &str, patch: ProductUpdateInput) -> Result<Product, AppError> {
        let mut product = self.get(id).await?;
        product.apply(patch);
        product.validate()?;

        let updated = self.repo.update(&product).await?;
        info!("Updated product {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let product = self.get(id).await?;
        self.repo.delete(&product.id).await?;
        info!("Deleted product {}", product.id);
        Ok(())
    }
}
