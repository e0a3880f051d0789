use actix_web::{web, HttpResponse, Result};

use crate::auth::AuthContext;
use crate::error::AppError;

/// Protected endpoint that returns the caller's identity and token claims
async fn me(ctx: AuthContext) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ctx))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(me)));
}
