use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the products table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProductModel {
    pub id: i32, // SERIAL surrogate key
    pub name: String,
    pub description: String,
    pub price: f64, // not validated; a negative price is stored as-is
}

/// Insert payload for a product row; the database assigns the id
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
}
