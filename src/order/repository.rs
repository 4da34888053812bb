use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument, warn};

use super::models::{NewOrder, OrderLineModel, OrderModel};
use crate::product::models::ProductModel;
use crate::product::repository::ProductRepository;
use crate::shared::AppError;

/// An order row together with its resolved product rows
#[derive(Debug, Clone)]
pub struct OrderWithProducts {
    pub order: OrderModel,
    pub products: Vec<ProductModel>,
}

/// Trait for order repository operations
#[async_trait]
pub trait OrderRepository {
    /// Writes the order row and one association row per product in a single
    /// unit of work. If any product id does not resolve, nothing is persisted
    /// and the call fails with NotFound.
    async fn create_order(&self, order: &NewOrder) -> Result<OrderWithProducts, AppError>;
    async fn get_order(&self, order_id: i32) -> Result<Option<OrderWithProducts>, AppError>;
}

#[derive(Default)]
struct OrderStore {
    rows: HashMap<i32, OrderModel>,
    lines: Vec<OrderLineModel>,
    next_id: i32,
}

/// In-memory implementation of OrderRepository for development and testing
///
/// Products are resolved through the shared product repository so order and
/// catalog state stay consistent. All product ids are resolved before any
/// state is touched, matching the all-or-nothing commit the Postgres
/// implementation gets from its transaction.
pub struct InMemoryOrderRepository {
    store: Mutex<OrderStore>,
    product_repository: Arc<dyn ProductRepository + Send + Sync>,
}

impl InMemoryOrderRepository {
    pub fn new(product_repository: Arc<dyn ProductRepository + Send + Sync>) -> Self {
        Self {
            store: Mutex::new(OrderStore::default()),
            product_repository,
        }
    }

    /// Returns the current number of orders in the repository
    pub fn order_count(&self) -> usize {
        self.store.lock().unwrap().rows.len()
    }

    /// Returns the current number of association rows in the repository
    pub fn line_count(&self) -> usize {
        self.store.lock().unwrap().lines.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[instrument(skip(self, order))]
    async fn create_order(&self, order: &NewOrder) -> Result<OrderWithProducts, AppError> {
        debug!(customer_id = order.customer_id, "Creating order in memory");

        // Resolve every product before touching the store
        let mut products = Vec::with_capacity(order.product_ids.len());
        for product_id in &order.product_ids {
            match self.product_repository.get_product(*product_id).await? {
                Some(product) => products.push(product),
                None => {
                    warn!(product_id, "Order references a missing product");
                    return Err(AppError::NotFound("Product not found".to_string()));
                }
            }
        }

        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let model = OrderModel {
            id: store.next_id,
            customer_id: order.customer_id,
            order_date: Utc::now(),
            total_amount: order.total_amount,
        };
        store.rows.insert(model.id, model.clone());
        for product in &products {
            store.lines.push(OrderLineModel {
                order_id: model.id,
                product_id: product.id,
                quantity: None,
            });
        }

        debug!(order_id = model.id, "Order created successfully in memory");
        Ok(OrderWithProducts {
            order: model,
            products,
        })
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order_id: i32) -> Result<Option<OrderWithProducts>, AppError> {
        debug!(order_id, "Fetching order from memory");

        let (order, product_ids) = {
            let store = self.store.lock().unwrap();
            let Some(order) = store.rows.get(&order_id).cloned() else {
                debug!(order_id, "Order not found in memory");
                return Ok(None);
            };
            let product_ids: Vec<i32> = store
                .lines
                .iter()
                .filter(|line| line.order_id == order_id)
                .map(|line| line.product_id)
                .collect();
            (order, product_ids)
        };

        let mut products = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            let product = self
                .product_repository
                .get_product(product_id)
                .await?
                .ok_or_else(|| {
                    AppError::DatabaseError("Order references a missing product".to_string())
                })?;
            products.push(product);
        }

        Ok(Some(OrderWithProducts { order, products }))
    }
}

/// PostgreSQL implementation of order repository
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_order(row: &sqlx::postgres::PgRow) -> OrderModel {
    OrderModel {
        id: row.get("id"),
        customer_id: row.get("customer_id"),
        order_date: row.get("order_date"),
        total_amount: row.get("total_amount"),
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
impl OrderRepository for PostgresOrderRepository {
    #[instrument(skip(self, order))]
    async fn create_order(&self, order: &NewOrder) -> Result<OrderWithProducts, AppError> {
        debug!(customer_id = order.customer_id, "Creating order in database");

        let mut tx = self.pool.begin().await.map_err(|e| {
            warn!(error = %e, "Failed to begin order transaction");
            AppError::DatabaseError(e.to_string())
        })?;

        let row = sqlx::query(
            "INSERT INTO orders (customer_id, total_amount) VALUES ($1, $2) \
             RETURNING id, customer_id, order_date, total_amount",
        )
        .bind(order.customer_id)
        .bind(order.total_amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create order in database");
            AppError::DatabaseError(e.to_string())
        })?;
        let model = row_to_order(&row);

        let mut products = Vec::with_capacity(order.product_ids.len());
        for product_id in &order.product_ids {
            let product_row =
                sqlx::query("SELECT id, name, description, price FROM products WHERE id = $1")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, product_id, "Failed to fetch product in order transaction");
                        AppError::DatabaseError(e.to_string())
                    })?;

            // Returning before commit drops the transaction and rolls back
            // the order row and any association rows written so far
            let Some(product_row) = product_row else {
                warn!(product_id, "Order references a missing product");
                return Err(AppError::NotFound("Product not found".to_string()));
            };
            let product = row_to_product(&product_row);

            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES ($1, $2)")
                .bind(model.id)
                .bind(product.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to attach product to order");
                    AppError::DatabaseError(e.to_string())
                })?;
            products.push(product);
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Failed to commit order transaction");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(order_id = model.id, "Order created successfully in database");
        Ok(OrderWithProducts {
            order: model,
            products,
        })
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order_id: i32) -> Result<Option<OrderWithProducts>, AppError> {
        debug!(order_id, "Fetching order from database");

        let row = sqlx::query(
            "SELECT id, customer_id, order_date, total_amount FROM orders WHERE id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, order_id, "Failed to fetch order from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let Some(row) = row else {
            debug!(order_id, "Order not found in database");
            return Ok(None);
        };
        let order = row_to_order(&row);

        let product_rows = sqlx::query(
            "SELECT p.id, p.name, p.description, p.price FROM products p \
             JOIN order_products op ON op.product_id = p.id WHERE op.order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, order_id, "Failed to fetch order products from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let products = product_rows.iter().map(row_to_product).collect();

        Ok(Some(OrderWithProducts { order, products }))
    }
}
