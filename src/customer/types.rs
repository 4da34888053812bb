use serde::{Deserialize, Serialize};

use super::models::CustomerModel;

/// Request body for customer registration
#[derive(Debug, Deserialize)]
pub struct CustomerCreateRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Customer record as returned over HTTP; carries no password material
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
}

impl From<CustomerModel> for CustomerResponse {
    fn from(model: CustomerModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
        }
    }
}
