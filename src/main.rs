#[tokio::main]
async fn main() {
    sales_backend::run().await;
}
