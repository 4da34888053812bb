// Public API - what other modules can use
pub use handlers::login;
pub use middleware::bearer_auth;
pub use password::{hash_password, verify_password};
pub use token::TokenConfig;
pub use types::Claims;

// Internal modules
mod handlers;
mod middleware;
mod password;
mod token;
pub mod types;
