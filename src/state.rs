use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{ClientRepository, OrderRepository, ProductRepository, UserRepository};
use crate::domain::services::{
    auth_service::AuthService, client_service::ClientService, order_service::OrderService,
    product_service::ProductService, user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub product_service: Arc<ProductService>,
    pub client_service: Arc<ClientService>,
    pub order_service: Arc<OrderService>,
}

impl AppState {
    pub fn new(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        product_repo: Arc<dyn ProductRepository>,
        client_repo: Arc<dyn ClientRepository>,
        order_repo: Arc<dyn OrderRepository>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::from_config(&config));

        Self {
            user_service: Arc::new(UserService::new(user_repo.clone(), auth_service.clone())),
            product_service: Arc::new(ProductService::new(product_repo.clone())),
            client_service: Arc::new(ClientService::new(client_repo.clone())),
            order_service: Arc::new(OrderService::new(order_repo.clone(), client_repo.clone())),
            config,
            user_repo,
            product_repo,
            client_repo,
            order_repo,
            auth_service,
        }
    }
}
