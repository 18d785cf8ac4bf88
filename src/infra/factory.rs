use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_client_repo::PostgresClientRepo, postgres_order_repo::PostgresOrderRepo,
    postgres_product_repo::PostgresProductRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_client_repo::SqliteClientRepo, sqlite_order_repo::SqliteOrderRepo,
    sqlite_product_repo::SqliteProductRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        postgres_state(config.clone(), pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        sqlite_state(config.clone(), pool)
    }
}

pub fn postgres_state(config: Config, pool: PgPool) -> AppState {
    AppState::new(
        config,
        Arc::new(PostgresUserRepo::new(pool.clone())),
        Arc::new(PostgresProductRepo::new(pool.clone())),
        Arc::new(PostgresClientRepo::new(pool.clone())),
        Arc::new(PostgresOrderRepo::new(pool)),
    )
}

pub fn sqlite_state(config: Config, pool: SqlitePool) -> AppState {
    AppState::new(
        config,
        Arc::new(SqliteUserRepo::new(pool.clone())),
        Arc::new(SqliteProductRepo::new(pool.clone())),
        Arc::new(SqliteClientRepo::new(pool.clone())),
        Arc::new(SqliteOrderRepo::new(pool)),
    )
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
