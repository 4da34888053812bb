use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::CustomerService;
use super::types::{CustomerCreateRequest, CustomerResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for customer registration
///
/// POST /customers/
/// Returns the created customer; the password never appears in the response
#[instrument(name = "create_customer", skip(state, request))]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerCreateRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    info!(email = %request.email, "Creating new customer");

    let service = CustomerService::new(Arc::clone(&state.customer_repository));
    let customer = service.register(request).await?;

    info!(customer_id = customer.id, "Customer created successfully");

    Ok(Json(customer.into()))
}

/// HTTP handler for reading a customer record
///
/// GET /customers/:customer_id (bearer-gated by the router)
#[instrument(name = "read_customer", skip(state))]
pub async fn read_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<CustomerResponse>, AppError> {
    info!(customer_id, "Reading customer");

    let service = CustomerService::new(Arc::clone(&state.customer_repository));
    let customer = service.get_customer(customer_id).await?;

    Ok(Json(customer.into()))
}
