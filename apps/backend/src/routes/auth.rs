use actix_web::http::header;
use actix_web::{web, HttpResponse, Result};

use crate::auth::Credentials;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::state::app_state::AppState;

/// Exchange `{id, name?, email}` for a bearer token.
///
/// The body echoes the stored user record; the token travels in the
/// `Authorization` response header.
async fn login(
    credentials: ValidatedJson<Credentials>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if credentials.id.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            "id cannot be empty",
        ));
    }
    if credentials.email.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            "email cannot be empty",
        ));
    }

    let issued = app_state.login.login(&credentials).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::AUTHORIZATION, issued.token.bearer()))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(issued.identity))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
