use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::models::{CustomerModel, NewCustomer};
use super::repository::CustomerRepository;
use super::types::CustomerCreateRequest;
use crate::auth;
use crate::shared::AppError;

/// Outcome of a credential check.
///
/// Deliberately not an error: an unknown email and a wrong password collapse
/// into the same variant so callers cannot leak which one occurred.
#[derive(Debug)]
pub enum AuthenticationResult {
    Authenticated(CustomerModel),
    InvalidCredentials,
}

/// Service for customer business logic
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository + Send + Sync>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Registers a new customer, hashing the password before it is stored
    #[instrument(skip(self, request))]
    pub async fn register(
        &self,
        request: CustomerCreateRequest,
    ) -> Result<CustomerModel, AppError> {
        info!(email = %request.email, "Registering new customer");

        if self.repository.find_by_email(&request.email).await?.is_some() {
            warn!(email = %request.email, "Registration rejected, email already registered");
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let hashed_password = auth::hash_password(&request.password)?;
        let new_customer = NewCustomer {
            email: request.email,
            hashed_password,
            full_name: request.full_name,
        };

        let customer = self.repository.insert_customer(&new_customer).await?;

        info!(customer_id = customer.id, "Customer registered successfully");
        Ok(customer)
    }

    /// Fetches a customer by id, failing with NotFound if absent
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: i32) -> Result<CustomerModel, AppError> {
        self.repository
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
    }

    /// Checks credentials against the stored hash
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticationResult, AppError> {
        let Some(customer) = self.repository.find_by_email(email).await? else {
            return Ok(AuthenticationResult::InvalidCredentials);
        };

        if !auth::verify_password(password, &customer.hashed_password) {
            return Ok(AuthenticationResult::InvalidCredentials);
        }

        Ok(AuthenticationResult::Authenticated(customer))
    }
}
