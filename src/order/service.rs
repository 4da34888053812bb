use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::models::NewOrder;
use super::repository::{OrderRepository, OrderWithProducts};
use super::types::OrderCreateRequest;
use crate::customer::repository::CustomerRepository;
use crate::shared::AppError;

/// Service for order business logic
pub struct OrderService {
    order_repository: Arc<dyn OrderRepository + Send + Sync>,
    customer_repository: Arc<dyn CustomerRepository + Send + Sync>,
}

impl OrderService {
    pub fn new(
        order_repository: Arc<dyn OrderRepository + Send + Sync>,
        customer_repository: Arc<dyn CustomerRepository + Send + Sync>,
    ) -> Self {
        Self {
            order_repository,
            customer_repository,
        }
    }

    /// Places an order: the customer must exist, every referenced product
    /// must exist, and the order row plus its associations commit together.
    #[instrument(skip(self, request))]
    pub async fn create_order(
        &self,
        request: OrderCreateRequest,
    ) -> Result<OrderWithProducts, AppError> {
        info!(
            customer_id = request.customer_id,
            product_count = request.product_ids.len(),
            "Creating new order"
        );

        // The owning customer must exist before any write happens
        if self
            .customer_repository
            .get_customer(request.customer_id)
            .await?
            .is_none()
        {
            warn!(
                customer_id = request.customer_id,
                "Order rejected, customer does not exist"
            );
            return Err(AppError::NotFound("Customer not found".to_string()));
        }

        let new_order = NewOrder {
            customer_id: request.customer_id,
            total_amount: request.total_amount,
            product_ids: request.product_ids,
        };

        let order = self.order_repository.create_order(&new_order).await?;

        info!(order_id = order.order.id, "Order created successfully");
        Ok(order)
    }
}
