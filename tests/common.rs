use sales_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::{run_sqlite_migrations, sqlite_state},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
        };

        let state = Arc::new(sqlite_state(config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Posts a GraphQL document and returns the decoded response body.
    pub async fn gql(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let payload = json!({ "query": query, "variables": variables });

        let mut builder = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = self.router.clone().oneshot(
            builder.body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Registers a seller and returns its id.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let body = self.gql(
            "mutation($input: UserInput!) { newUser(input: $input) { id email } }",
            json!({ "input": {
                "firstName": "Test",
                "lastName": "Seller",
                "email": email,
                "password": password,
            }}),
            None,
        ).await;
        body["data"]["newUser"]["id"].as_str()
            .unwrap_or_else(|| panic!("Registration failed in test helper: {}", body))
            .to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = self.gql(
            "mutation($input: AuthenticateInput!) { authenticateUser(input: $input) { token } }",
            json!({ "input": { "email": email, "password": password } }),
            None,
        ).await;
        body["data"]["authenticateUser"]["token"].as_str()
            .unwrap_or_else(|| panic!("Login failed in test helper: {}", body))
            .to_string()
    }

    /// Registers and logs in a fresh seller, returning `(user_id, token)`.
    pub async fn seller(&self, email: &str) -> (String, String) {
        let id = self.register(email, "secret123").await;
        let token = self.login(email, "secret123").await;
        (id, token)
    }

    pub async fn create_product(&self, name: &str, stock: i32, price: f64) -> String {
        let body = self.gql(
            "mutation($input: ProductInput!) { newProduct(input: $input) { id } }",
            json!({ "input": { "name": name, "stock": stock, "price": price } }),
            None,
        ).await;
        body["data"]["newProduct"]["id"].as_str()
            .unwrap_or_else(|| panic!("Product creation failed: {}", body))
            .to_string()
    }

    pub async fn create_client(&self, token: &str, email: &str) -> String {
        let body = self.gql(
            "mutation($input: ClientInput!) { newClient(input: $input) { id } }",
            json!({ "input": {
                "firstName": "Ada",
                "lastName": "Buyer",
                "company": "Acme",
                "email": email,
            }}),
            Some(token),
        ).await;
        body["data"]["newClient"]["id"].as_str()
            .unwrap_or_else(|| panic!("Client creation failed: {}", body))
            .to_string()
    }

    /// Places an order with the given `(product_id, quantity)` lines and returns the raw response.
    pub async fn place_order(&self, token: &str, client_id: &str, items: &[(&str, i32)], total: f64, status: Option<&str>) -> Value {
        let items: Vec<Value> = items.iter()
            .map(|(product_id, quantity)| json!({ "productId": product_id, "quantity": quantity }))
            .collect();
        let mut input = json!({ "items": items, "total": total, "clientId": client_id });
        if let Some(status) = status {
            input["status"] = json!(status);
        }
        self.gql(
            "mutation($input: OrderInput!) { newOrder(input: $input) { id status total items { productId quantity } } }",
            json!({ "input": input }),
            Some(token),
        ).await
    }

    pub async fn stock_of(&self, product_id: &str) -> i64 {
        let body = self.gql(
            "query($id: ID!) { getProduct(id: $id) { stock } }",
            json!({ "id": product_id }),
            None,
        ).await;
        body["data"]["getProduct"]["stock"].as_i64()
            .unwrap_or_else(|| panic!("Product lookup failed: {}", body))
    }
}

/// The `code` extension of the first GraphQL error, if any.
#[allow(dead_code)]
pub fn error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
