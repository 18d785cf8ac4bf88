use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::{app_state, caller};
use crate::domain::models::{
    auth::Token,
    user::{AuthenticateInput, User, UserInput},
};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Decodes a session token and returns the identity it carries.
    async fn get_user(&self, ctx: &Context<'_>, token: String) -> Result<User> {
        app_state(ctx)?
            .user_service
            .user_from_token(&token)
            .map_err(|e| e.extend())
    }

    /// The stored record of the authenticated caller.
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let user = caller(ctx)?;
        app_state(ctx)?
            .user_service
            .get(&user.id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn new_user(&self, ctx: &Context<'_>, input: UserInput) -> Result<User> {
        app_state(ctx)?
            .user_service
            .register(input)
            .await
            .map_err(|e| e.extend())
    }

    async fn authenticate_user(&self, ctx: &Context<'_>, input: AuthenticateInput) -> Result<Token> {
        app_state(ctx)?
            .user_service
            .authenticate(input)
            .await
            .map_err(|e| e.extend())
    }
}
