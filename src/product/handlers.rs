use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::ProductService;
use super::types::{ProductCreateRequest, ProductResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for catalog entry
///
/// POST /products/ (bearer-gated by the router)
#[instrument(name = "create_product", skip(state, request))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<ProductCreateRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    info!(name = %request.name, "Creating new product");

    let service = ProductService::new(Arc::clone(&state.product_repository));
    let product = service.create_product(request).await?;

    info!(product_id = product.id, "Product created successfully");

    Ok(Json(product.into()))
}
