use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod health;
pub mod me;
pub mod metrics;

async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        "No resource at this path",
    ))
}

/// Register every route. Authentication is applied by `AuthGate` at the app
/// level, so exemptions come from the route policy rather than from scoping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(me::configure_routes)
        .configure(metrics::configure_routes)
        .default_service(web::to(not_found));
}
