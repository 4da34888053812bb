use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::app::create_router;
use storefront::auth::TokenConfig;
use storefront::customer::repository::PostgresCustomerRepository;
use storefront::order::repository::PostgresOrderRepository;
use storefront::product::repository::PostgresProductRepository;
use storefront::shared::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront API server");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Create shared application state with dependency injection
    let customer_repository = Arc::new(PostgresCustomerRepository::new(pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pool.clone()));
    let order_repository = Arc::new(PostgresOrderRepository::new(pool));
    let token_config = TokenConfig::new();

    let app_state = AppState::new(
        customer_repository,
        product_repository,
        order_repository,
        token_config,
    );

    let app = create_router(app_state);

    // run our app with hyper, listening globally on port 8000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
    info!("Server running on http://localhost:8000");
    axum::serve(listener, app).await.unwrap();
}
