use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::service::OrderService;
use super::types::{OrderCreateRequest, OrderResponse};
use crate::customer::models::CustomerModel;
use crate::shared::{AppError, AppState};

/// HTTP handler for order placement
///
/// POST /orders/ (bearer-gated by the router)
/// The authenticated customer may only place orders for themselves.
#[instrument(name = "create_order", skip(state, current_customer, request))]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(current_customer): Extension<CustomerModel>,
    Json(request): Json<OrderCreateRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    info!(
        customer_id = request.customer_id,
        caller_id = current_customer.id,
        "Creating new order"
    );

    if request.customer_id != current_customer.id {
        warn!(
            customer_id = request.customer_id,
            caller_id = current_customer.id,
            "Order rejected, caller is not the target customer"
        );
        return Err(AppError::Forbidden(
            "Cannot create orders for other customers".to_string(),
        ));
    }

    let service = OrderService::new(
        Arc::clone(&state.order_repository),
        Arc::clone(&state.customer_repository),
    );
    let order = service.create_order(request).await?;

    info!(order_id = order.order.id, "Order created successfully");

    Ok(Json(order.into()))
}
