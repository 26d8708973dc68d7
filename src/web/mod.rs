//! Web server module
//!
//! Provides the HTTP API for ask-relay.

mod extract;
mod handlers;
mod routes;
mod state;

pub use extract::ValidJson;
pub use handlers::{CredentialRequest, QueryRequest, QueryResponse};
pub use routes::create_router;
pub use state::AppState;
