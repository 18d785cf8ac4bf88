use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result, ID};

use super::{app_state, caller};
use crate::domain::models::{
    client::Client,
    order::{Order, OrderInput, OrderItem, OrderStatus, OrderUpdateInput},
    product::Product,
    user::User,
};

#[ComplexObject]
impl Order {
    async fn client(&self, ctx: &Context<'_>) -> Result<Option<Client>> {
        app_state(ctx)?
            .client_repo
            .find_by_id(&self.client_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn seller(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        app_state(ctx)?
            .user_repo
            .find_by_id(&self.seller_id)
            .await
            .map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl OrderItem {
    async fn product(&self, ctx: &Context<'_>) -> Result<Option<Product>> {
        app_state(ctx)?
            .product_repo
            .find_by_id(&self.product_id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct OrderQuery;

#[Object]
impl OrderQuery {
    async fn get_orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        app_state(ctx)?.order_service.list().await.map_err(|e| e.extend())
    }

    async fn get_seller_orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .order_service
            .list_for_seller(user)
            .await
            .map_err(|e| e.extend())
    }

    async fn get_order(&self, ctx: &Context<'_>, id: ID) -> Result<Order> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .order_service
            .get(user, &id)
            .await
            .map_err(|e| e.extend())
    }

    /// The caller's orders in the given status.
    async fn get_orders_by_status(&self, ctx: &Context<'_>, status: OrderStatus) -> Result<Vec<Order>> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .order_service
            .list_by_status(user, status)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct OrderMutation;

#[Object]
impl OrderMutation {
    async fn new_order(&self, ctx: &Context<'_>, input: OrderInput) -> Result<Order> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .order_service
            .create(user, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn update_order(&self, ctx: &Context<'_>, id: ID, input: OrderUpdateInput) -> Result<Order> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .order_service
            .update(user, &id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_order(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .order_service
            .delete(user, &id)
            .await
            .map_err(|e| e.extend())?;
        Ok("Order deleted".to_string())
    }
}
