use std::sync::Arc;

use async_graphql::{
    http::GraphiQLSource, Context, EmptySubscription, ErrorExtensions, MergedObject, Schema,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Extension,
};

use crate::api::extractors::maybe_auth::MaybeAuthUser;
use crate::domain::models::user::User;
use crate::state::AppState;

pub mod client;
pub mod context;
pub mod order;
pub mod product;
pub mod report;
pub mod user;

pub use context::RequestContext;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    user::UserQuery,
    product::ProductQuery,
    client::ClientQuery,
    order::OrderQuery,
    report::ReportQuery,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    user::UserMutation,
    product::ProductMutation,
    client::ClientMutation,
    order::OrderMutation,
);

pub type SalesSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The schema carries no data of its own; state and caller are attached per request.
pub fn build_schema() -> SalesSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .limit_depth(10)
        .limit_complexity(500)
        .finish()
}

pub fn export_sdl() -> String {
    build_schema().sdl()
}

pub async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    Extension(schema): Extension<SalesSchema>,
    MaybeAuthUser(user): MaybeAuthUser,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req
        .into_inner()
        .data(state)
        .data(RequestContext::new(user));
    schema.execute(request).await.into()
}

pub async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub(crate) fn app_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<AppState>> {
    ctx.data::<Arc<AppState>>()
}

pub(crate) fn caller<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a User> {
    ctx.data::<RequestContext>()?
        .require_user()
        .map_err(|e| e.extend())
}
