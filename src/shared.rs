use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::TokenConfig;
use crate::customer::repository::CustomerRepository;
use crate::order::repository::OrderRepository;
use crate::product::repository::ProductRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub customer_repository: Arc<dyn CustomerRepository + Send + Sync>,
    pub product_repository: Arc<dyn ProductRepository + Send + Sync>,
    pub order_repository: Arc<dyn OrderRepository + Send + Sync>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(
        customer_repository: Arc<dyn CustomerRepository + Send + Sync>,
        product_repository: Arc<dyn ProductRepository + Send + Sync>,
        order_repository: Arc<dyn OrderRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            customer_repository,
            product_repository,
            order_repository,
            token_config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            // uniqueness violations surface as 400, not 409 (public contract)
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_error_status_mapping() {
        let cases = vec![
            (
                AppError::NotFound("Customer not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Conflict("Email already registered".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("Could not validate credentials".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Forbidden("Cannot create orders for other customers".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::DatabaseError("connection reset".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_unauthorized_response_carries_challenge_header() {
        let response = AppError::Unauthorized("no token".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }
}
