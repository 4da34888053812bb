use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::OrderWithProducts;
use crate::product::types::ProductResponse;

/// Request body for order placement
#[derive(Debug, Deserialize)]
pub struct OrderCreateRequest {
    pub customer_id: i32,
    pub total_amount: f64,
    pub product_ids: Vec<i32>,
}

/// Order record as returned over HTTP, with its resolved product list
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
    pub products: Vec<ProductResponse>,
}

impl From<OrderWithProducts> for OrderResponse {
    fn from(value: OrderWithProducts) -> Self {
        Self {
            id: value.order.id,
            customer_id: value.order.customer_id,
            order_date: value.order.order_date,
            total_amount: value.order.total_amount,
            products: value.products.into_iter().map(Into::into).collect(),
        }
    }
}
