use crate::domain::models::{
    client::Client,
    order::{Order, OrderStatus, TopClient, TopSeller},
    product::Product,
    user::User,
};
use crate::domain::services::stock::StockChange;
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<Product, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;
    async fn list(&self) -> Result<Vec<Product>, AppError>;
    async fn search(&self, text: &str, limit: i64) -> Result<Vec<Product>, AppError>;
    async fn update(&self, product: &Product) -> Result<Product, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<Client, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError>;
    async fn list(&self) -> Result<Vec<Client>, AppError>;
    async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<Client>, AppError>;
    async fn update(&self, client: &Client) -> Result<Client, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Decides, from the order as stored when the write transaction holds it,
/// the replacement order and the stock moves that go with it.
pub type UpdatePlan<'a> = dyn Fn(Order) -> Result<(Order, Vec<StockChange>), AppError> + Send + Sync + 'a;

/// Decides, from the stored order, the stock moves that go with deleting it.
pub type DeletePlan<'a> = dyn Fn(&Order) -> Result<Vec<StockChange>, AppError> + Send + Sync + 'a;

/// Orders and the product stock they hold are written together. `update` and
/// `delete` lock the order row, run the plan on that copy and apply the
/// resulting stock moves with the order write in one transaction.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order, stock: &[StockChange]) -> Result<Order, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError>;
    async fn list(&self) -> Result<Vec<Order>, AppError>;
    async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<Order>, AppError>;
    async fn list_by_seller_and_status(&self, seller_id: &str, status: OrderStatus) -> Result<Vec<Order>, AppError>;
    async fn update(&self, id: &str, plan: &UpdatePlan<'_>) -> Result<Order, AppError>;
    async fn delete(&self, id: &str, plan: &DeletePlan<'_>) -> Result<(), AppError>;
    async fn top_clients(&self) -> Result<Vec<TopClient>, AppError>;
    async fn top_sellers(&self, limit: i64) -> Result<Vec<TopSeller>, AppError>;
}
