//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the price quoter
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// `admin_token` guards the admin routes; `None` leaves them open.
pub fn build_app(services: AppServices, admin_token: Option<String>) -> Router {
    let services = Arc::new(services);
    let auth_state = middleware::AdminAuthState::new(admin_token);

    let admin = routes::admin_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::admin_auth,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .merge(admin)
        .layer(Extension(services))
}
