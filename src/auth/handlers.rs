use axum::{extract::State, Form, Json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::types::{LoginRequest, TokenResponse};
use crate::customer::service::{AuthenticationResult, CustomerService};
use crate::shared::{AppError, AppState};

/// HTTP handler for the token endpoint
///
/// POST /token (form-encoded username + password)
/// Returns a signed bearer token on valid credentials
#[instrument(name = "login", skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    info!(username = %form.username, "Processing login request");

    let service = CustomerService::new(Arc::clone(&state.customer_repository));

    // Unknown email and wrong password produce the same rejection
    let customer = match service.authenticate(&form.username, &form.password).await? {
        AuthenticationResult::Authenticated(customer) => customer,
        AuthenticationResult::InvalidCredentials => {
            warn!(username = %form.username, "Login rejected");
            return Err(AppError::Unauthorized(
                "Incorrect username or password".to_string(),
            ));
        }
    };

    let access_token = state.token_config.create_token(&customer.email)?;

    info!(customer_id = customer.id, "Login successful, token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
