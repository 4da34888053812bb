use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{NewProduct, ProductModel};
use crate::shared::AppError;

/// Trait for product repository operations
#[async_trait]
pub trait ProductRepository {
    async fn insert_product(&self, product: &NewProduct) -> Result<ProductModel, AppError>;
    async fn get_product(&self, product_id: i32) -> Result<Option<ProductModel>, AppError>;
}

#[derive(Default)]
struct ProductStore {
    rows: HashMap<i32, ProductModel>,
    next_id: i32,
}

/// In-memory implementation of ProductRepository for development and testing
pub struct InMemoryProductRepository {
    store: Mutex<ProductStore>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            store: Mutex::new(ProductStore::default()),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, product))]
    async fn insert_product(&self, product: &NewProduct) -> Result<ProductModel, AppError> {
        debug!(name = %product.name, "Creating product in memory");

        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let model = ProductModel {
            id: store.next_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        };
        store.rows.insert(model.id, model.clone());

        debug!(product_id = model.id, "Product created successfully in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: i32) -> Result<Option<ProductModel>, AppError> {
        debug!(product_id, "Fetching product from memory");

        let store = self.store.lock().unwrap();
        Ok(store.rows.get(&product_id).cloned())
    }
}

/// PostgreSQL implementation of product repository
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: &sqlx::postgres::PgRow) -> ProductModel {
    ProductModel {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, product))]
    async fn insert_product(&self, product: &NewProduct) -> Result<ProductModel, AppError> {
        debug!(name = %product.name, "Creating product in database");

        let row = sqlx::query(
            "INSERT INTO products (name, description, price) VALUES ($1, $2, $3) \
             RETURNING id, name, description, price",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create product in database");
            AppError::DatabaseError(e.to_string())
        })?;

        let model = row_to_product(&row);
        debug!(product_id = model.id, "Product created successfully in database");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: i32) -> Result<Option<ProductModel>, AppError> {
        debug!(product_id, "Fetching product from database");

        let row = sqlx::query("SELECT id, name, description, price FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, product_id, "Failed to fetch product from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(row.as_ref().map(row_to_product))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "A test product".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let created = repo.insert_product(&new_product("Widget", 9.99)).await.unwrap();
        assert_eq!(created.id, 1);

        let retrieved = repo.get_product(created.id).await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Widget");
        assert_eq!(retrieved.price, 9.99);
    }

    #[tokio::test]
    async fn test_get_nonexistent_product() {
        let repo = InMemoryProductRepository::new();

        let result = repo.get_product(42).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_negative_price_is_stored_as_is() {
        let repo = InMemoryProductRepository::new();

        let created = repo
            .insert_product(&new_product("Refund voucher", -5.0))
            .await
            .unwrap();
        assert_eq!(created.price, -5.0);
    }
}
