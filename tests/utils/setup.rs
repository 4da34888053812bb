use std::sync::Arc;

use axum::Router;
use storefront::auth::TokenConfig;
use storefront::customer::repository::InMemoryCustomerRepository;
use storefront::order::repository::InMemoryOrderRepository;
use storefront::product::repository::InMemoryProductRepository;
use storefront::shared::AppState;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// Full application router over in-memory repositories, with handles kept on
/// the repositories so tests can assert on persisted state directly.
pub struct TestApp {
    pub router: Router,
    pub customer_repository: Arc<InMemoryCustomerRepository>,
    pub product_repository: Arc<InMemoryProductRepository>,
    pub order_repository: Arc<InMemoryOrderRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_token_config(TokenConfig::new())
    }

    /// Builds the app with a specific token configuration, e.g. one whose
    /// tokens are already expired at issue time.
    pub fn with_token_config(token_config: TokenConfig) -> Self {
        let customer_repository = Arc::new(InMemoryCustomerRepository::new());
        let product_repository = Arc::new(InMemoryProductRepository::new());
        let order_repository = Arc::new(InMemoryOrderRepository::new(product_repository.clone()));

        let app_state = AppState::new(
            customer_repository.clone(),
            product_repository.clone(),
            order_repository.clone(),
            token_config,
        );

        Self {
            router: storefront::create_router(app_state),
            customer_repository,
            product_repository,
            order_repository,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
