use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::app_state;
use crate::domain::models::order::{TopClient, TopSeller};

#[derive(Default)]
pub struct ReportQuery;

#[Object]
impl ReportQuery {
    /// Clients ranked by the summed total of their completed orders.
    async fn top_clients(&self, ctx: &Context<'_>) -> Result<Vec<TopClient>> {
        app_state(ctx)?.order_service.top_clients().await.map_err(|e| e.extend())
    }

    /// The five sellers with the highest completed-order totals.
    async fn top_sellers(&self, ctx: &Context<'_>) -> Result<Vec<TopSeller>> {
        app_state(ctx)?.order_service.top_sellers().await.map_err(|e| e.extend())
    }
}
