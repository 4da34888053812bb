use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the orders table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderModel {
    pub id: i32, // SERIAL surrogate key
    pub customer_id: i32,
    pub order_date: DateTime<Utc>, // server-assigned, immutable
    pub total_amount: f64,         // client-supplied, not reconciled with line items
}

/// Database model for the order_products association table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderLineModel {
    pub order_id: i32,
    pub product_id: i32,
    // TODO: populate quantity once order requests carry per-line quantities;
    // the column exists but nothing writes or reads it today.
    pub quantity: Option<i32>,
}

/// Insert payload for an order and its product associations
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub total_amount: f64,
    pub product_ids: Vec<i32>,
}
