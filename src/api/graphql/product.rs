use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::app_state;
use crate::domain::models::product::{Product, ProductInput, ProductUpdateInput};

#[derive(Default)]
pub struct ProductQuery;

#[Object]
impl ProductQuery {
    async fn get_products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        app_state(ctx)?.product_service.list().await.map_err(|e| e.extend())
    }

    async fn get_product(&self, ctx: &Context<'_>, id: ID) -> Result<Product> {
        app_state(ctx)?.product_service.get(&id).await.map_err(|e| e.extend())
    }

    /// Case-insensitive match on the product name, at most 10 results.
    async fn search_product(&self, ctx: &Context<'_>, text: String) -> Result<Vec<Product>> {
        app_state(ctx)?.product_service.search(&text).await.map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct ProductMutation;

#[Object]
impl ProductMutation {
    async fn new_product(&self, ctx: &Context<'_>, input: ProductInput) -> Result<Product> {
        app_state(ctx)?.product_service.create(input).await.map_err(|e| e.extend())
    }

    async fn update_product(&self, ctx: &Context<'_>, id: ID, input: ProductUpdateInput) -> Result<Product> {
        app_state(ctx)?.product_service.update(&id, input).await.map_err(|e| e.extend())
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        app_state(ctx)?.product_service.delete(&id).await.map_err(|e| e.extend())?;
        Ok("Product deleted".to_string())
    }
}
