use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the customers table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CustomerModel {
    pub id: i32, // SERIAL surrogate key
    pub email: String,
    pub hashed_password: String, // Argon2 PHC string, never exposed over HTTP
    pub full_name: String,
}

/// Insert payload for a customer row; the database assigns the id
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub email: String,
    pub hashed_password: String,
    pub full_name: String,
}
