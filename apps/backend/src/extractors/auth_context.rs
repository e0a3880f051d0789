use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::{AuthContext, AuthError};
use crate::error::AppError;

/// Pulls the [`AuthContext`] that `AuthGate` stored for this request.
///
/// Only fails when a handler asking for it is mounted on an exempt route.
impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| AppError::from(AuthError::MissingCredentials)),
        )
    }
}
