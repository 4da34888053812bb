use serde::{Deserialize, Serialize};

use super::models::ProductModel;

/// Request body for catalog entry
#[derive(Debug, Deserialize)]
pub struct ProductCreateRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Product record as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<ProductModel> for ProductResponse {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
        }
    }
}
