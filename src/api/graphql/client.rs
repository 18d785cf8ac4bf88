use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result, ID};

use super::{app_state, caller};
use crate::domain::models::{
    client::{Client, ClientInput, ClientUpdateInput},
    user::User,
};

#[ComplexObject]
impl Client {
    async fn seller(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        app_state(ctx)?
            .user_repo
            .find_by_id(&self.seller_id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct ClientQuery;

#[Object]
impl ClientQuery {
    async fn get_clients(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        app_state(ctx)?.client_service.list().await.map_err(|e| e.extend())
    }

    /// Clients owned by the authenticated seller.
    async fn get_seller_clients(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .client_service
            .list_for_seller(user)
            .await
            .map_err(|e| e.extend())
    }

    async fn get_client(&self, ctx: &Context<'_>, id: ID) -> Result<Client> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .client_service
            .get(user, &id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct ClientMutation;

#[Object]
impl ClientMutation {
    async fn new_client(&self, ctx: &Context<'_>, input: ClientInput) -> Result<Client> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .client_service
            .create(user, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn update_client(&self, ctx: &Context<'_>, id: ID, input: ClientUpdateInput) -> Result<Client> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .client_service
            .update(user, &id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .client_service
            .delete(user, &id)
            .await
            .map_err(|e| e.extend())?;
        Ok("Client deleted".to_string())
    }
}
