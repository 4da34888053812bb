use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{CustomerModel, NewCustomer};
use crate::shared::AppError;

/// Trait for customer repository operations
#[async_trait]
pub trait CustomerRepository {
    /// Inserts a customer row and returns it with its assigned id.
    /// Fails with Conflict if the email is already registered.
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerModel, AppError>;
    async fn get_customer(&self, customer_id: i32) -> Result<Option<CustomerModel>, AppError>;
    /// Lookup by email; an unknown email is an empty result, not an error
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, AppError>;
}

#[derive(Default)]
struct CustomerStore {
    rows: HashMap<i32, CustomerModel>,
    next_id: i32,
}

/// In-memory implementation of CustomerRepository for development and testing
///
/// Mirrors the relational semantics the Postgres implementation gets for
/// free: sequential ids starting at 1 and a unique constraint on email.
pub struct InMemoryCustomerRepository {
    store: Mutex<CustomerStore>,
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCustomerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            store: Mutex::new(CustomerStore::default()),
        }
    }

    /// Returns the current number of customers in the repository
    pub fn customer_count(&self) -> usize {
        self.store.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    #[instrument(skip(self, customer))]
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerModel, AppError> {
        debug!(email = %customer.email, "Creating customer in memory");

        let mut store = self.store.lock().unwrap();
        if store.rows.values().any(|c| c.email == customer.email) {
            warn!(email = %customer.email, "Email already registered in memory");
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        store.next_id += 1;
        let model = CustomerModel {
            id: store.next_id,
            email: customer.email.clone(),
            hashed_password: customer.hashed_password.clone(),
            full_name: customer.full_name.clone(),
        };
        store.rows.insert(model.id, model.clone());

        debug!(customer_id = model.id, "Customer created successfully in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_customer(&self, customer_id: i32) -> Result<Option<CustomerModel>, AppError> {
        debug!(customer_id, "Fetching customer from memory");

        let store = self.store.lock().unwrap();
        Ok(store.rows.get(&customer_id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, AppError> {
        debug!(email = %email, "Fetching customer by email from memory");

        let store = self.store.lock().unwrap();
        Ok(store.rows.values().find(|c| c.email == email).cloned())
    }
}

/// PostgreSQL implementation of customer repository
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_customer(row: &sqlx::postgres::PgRow) -> CustomerModel {
    CustomerModel {
        id: row.get("id"),
        email: row.get("email"),
        hashed_password: row.get("hashed_password"),
        full_name: row.get("full_name"),
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    #[instrument(skip(self, customer))]
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerModel, AppError> {
        debug!(email = %customer.email, "Creating customer in database");

        let row = sqlx::query(
            "INSERT INTO customers (email, hashed_password, full_name) VALUES ($1, $2, $3) \
             RETURNING id, email, hashed_password, full_name",
        )
        .bind(&customer.email)
        .bind(&customer.hashed_password)
        .bind(&customer.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A concurrent registration can slip past the service pre-check;
            // the unique constraint is the source of truth
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    warn!(email = %customer.email, "Email already registered in database");
                    return AppError::Conflict("Email already registered".to_string());
                }
            }
            warn!(error = %e, "Failed to create customer in database");
            AppError::DatabaseError(e.to_string())
        })?;

        let model = row_to_customer(&row);
        debug!(customer_id = model.id, "Customer created successfully in database");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_customer(&self, customer_id: i32) -> Result<Option<CustomerModel>, AppError> {
        debug!(customer_id, "Fetching customer from database");

        let row = sqlx::query(
            "SELECT id, email, hashed_password, full_name FROM customers WHERE id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, customer_id, "Failed to fetch customer from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.as_ref().map(row_to_customer))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, AppError> {
        debug!(email = %email, "Fetching customer by email from database");

        let row = sqlx::query(
            "SELECT id, email, hashed_password, full_name FROM customers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch customer by email from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.as_ref().map(row_to_customer))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            email: email.to_string(),
            hashed_password: "$argon2id$test-hash".to_string(),
            full_name: "Test Customer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_customer() {
        let repo = InMemoryCustomerRepository::new();

        let created = repo.insert_customer(&new_customer("a@x.com")).await.unwrap();
        assert_eq!(created.id, 1);

        let retrieved = repo.get_customer(created.id).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let repo = InMemoryCustomerRepository::new();

        let first = repo.insert_customer(&new_customer("a@x.com")).await.unwrap();
        let second = repo.insert_customer(&new_customer("b@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.customer_count(), 2);
    }

    #[tokio::test]
    async fn test_get_nonexistent_customer() {
        let repo = InMemoryCustomerRepository::new();

        let result = repo.get_customer(42).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let repo = InMemoryCustomerRepository::new();

        repo.insert_customer(&new_customer("a@x.com")).await.unwrap();

        let result = repo.insert_customer(&new_customer("a@x.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.customer_count(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryCustomerRepository::new();

        repo.insert_customer(&new_customer("a@x.com")).await.unwrap();

        let found = repo.find_by_email("a@x.com").await.unwrap();
        assert!(found.is_some());

        // Unknown email is an empty result, not an error
        let missing = repo.find_by_email("b@x.com").await.unwrap();
        assert!(missing.is_none());
    }
}
