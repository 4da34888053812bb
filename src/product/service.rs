use std::sync::Arc;
use tracing::{info, instrument};

use super::models::{NewProduct, ProductModel};
use super::repository::ProductRepository;
use super::types::ProductCreateRequest;
use crate::shared::AppError;

/// Service for product business logic
pub struct ProductService {
    repository: Arc<dyn ProductRepository + Send + Sync>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Adds a product to the catalog. No validation beyond types is applied.
    #[instrument(skip(self, request))]
    pub async fn create_product(
        &self,
        request: ProductCreateRequest,
    ) -> Result<ProductModel, AppError> {
        info!(name = %request.name, "Creating new product");

        let new_product = NewProduct {
            name: request.name,
            description: request.description,
            price: request.price,
        };

        let product = self.repository.insert_product(&new_product).await?;

        info!(product_id = product.id, "Product created successfully");
        Ok(product)
    }

    /// Fetches a product by id, failing with NotFound if absent
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: i32) -> Result<ProductModel, AppError> {
        self.repository
            .get_product(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }
}
