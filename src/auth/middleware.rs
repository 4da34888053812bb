use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::customer::repository::CustomerRepository;
use crate::shared::{AppError, AppState};

/// Bearer authentication middleware - validates the Authorization header and
/// resolves the token subject to a customer row before the handler runs.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), auth::bearer_auth))
/// Handlers can then extract Extension(customer): Extension<CustomerModel>.
#[instrument(skip(state, req, next))]
pub async fn bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!(uri = %req.uri(), "Bearer authentication middleware triggered");

    // Extract token from Authorization Bearer header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Could not validate credentials".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Could not validate credentials".to_string())
    })?;

    // Validate signature and expiry
    let claims = state.token_config.validate_token(token)?;

    // The subject must still resolve to a customer row
    let customer = state
        .customer_repository
        .find_by_email(&claims.sub)
        .await?
        .ok_or_else(|| {
            warn!(email = %claims.sub, "Token subject does not match any customer");
            AppError::Unauthorized("Could not validate credentials".to_string())
        })?;

    debug!(
        customer_id = customer.id,
        email = %customer.email,
        "Authentication successful, adding customer to request"
    );

    // Add the resolved customer to request extensions for handlers to use
    req.extensions_mut().insert(customer);

    // Continue to next middleware/handler
    Ok(next.run(req).await)
}
