//! HTTP API module.
//!
//! Provides the `/start` and `/submit` quiz endpoints plus a health check.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{HealthResponse, StartRequest, StartResponse, SubmitRequest, SubmitResponse};
pub use routes::create_router;
pub use state::{AppState, CorsState, DEFAULT_ALLOWED_ORIGIN};
