use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;
use crate::{auth, customer, order, product};

/// Builds the application router.
///
/// Registration and login are public; every other route runs behind the
/// bearer middleware, which resolves the token to a customer before the
/// handler body executes.
pub fn create_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/token", post(auth::login))
        .route("/customers/", post(customer::create_customer));

    let protected_routes = Router::new()
        .route("/customers/:customer_id", get(customer::read_customer))
        .route("/products/", post(product::create_product))
        .route("/orders/", post(order::create_order))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::bearer_auth,
        ));

    public_routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
