//! Authentication gate.
//!
//! Wraps the whole app. For every request it either lets an exempt route pass
//! untouched, or verifies the bearer token, resolves its subject and stores an
//! [`AuthContext`] in request extensions before calling the handler. Failures
//! short-circuit with a generic 401 and never reach the handler.
//!
//! ```text
//! Unauthenticated ──exempt──▶ Passthrough
//!        │
//!        └─▶ TokenExtracted ─▶ Verified ─▶ Resolved ─▶ Authenticated
//!              (any step) ──▶ Rejected(reason)
//! ```

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, error, Span};

use crate::auth::{AuthContext, AuthError, ClaimsCodec, IdentityResolver};
use crate::config::RouteAuthPolicy;
use crate::error::AppError;
use crate::logging::pii::fingerprint;
use crate::logging::security;

struct GateDeps {
    codec: ClaimsCodec,
    resolver: Arc<dyn IdentityResolver>,
    policy: RouteAuthPolicy,
}

/// Terminal non-rejected states.
enum GateOutcome {
    Passthrough,
    Authenticated(AuthContext),
}

/// Middleware factory. Cheap to clone; one instance per worker.
#[derive(Clone)]
pub struct AuthGate {
    deps: Arc<GateDeps>,
}

impl AuthGate {
    pub fn new(
        codec: ClaimsCodec,
        resolver: Arc<dyn IdentityResolver>,
        policy: RouteAuthPolicy,
    ) -> Self {
        Self {
            deps: Arc::new(GateDeps {
                codec,
                resolver,
                policy,
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            deps: Arc::clone(&self.deps),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    deps: Arc<GateDeps>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let deps = Arc::clone(&self.deps);

        Box::pin(async move {
            match deps.authenticate(&req).await {
                Ok(GateOutcome::Passthrough) => {
                    debug!(path = %req.path(), "auth_passthrough");
                    let res = service.call(req).await?;
                    Ok(res.map_into_boxed_body())
                }
                Ok(GateOutcome::Authenticated(ctx)) => {
                    Span::current().record("sub", ctx.subject());
                    debug!(sub = %ctx.subject(), "auth_authenticated");
                    req.extensions_mut().insert(ctx);
                    let res = service.call(req).await?;
                    Ok(res.map_into_boxed_body())
                }
                Err(err) => Ok(req.error_response(err)),
            }
        })
    }
}

impl GateDeps {
    async fn authenticate(&self, req: &ServiceRequest) -> Result<GateOutcome, AppError> {
        let path = req.path();
        if self.policy.is_exempt(path) {
            return Ok(GateOutcome::Passthrough);
        }

        let token = bearer_token(req.headers()).map_err(|reason| reject(reason, path, None))?;
        let token_fp = fingerprint(&token);

        let claims = self
            .codec
            .verify(&token)
            .map_err(|reason| reject(reason, path, Some(token_fp.as_str())))?;

        // Single suspension point; nothing is locked across it.
        let identity = match self.resolver.resolve(&claims.sub).await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                return Err(reject(
                    AuthError::UnknownSubject,
                    path,
                    Some(token_fp.as_str()),
                ))
            }
            Err(e) => {
                error!(error = %e, path, "identity_resolver_failed");
                return Err(e);
            }
        };

        Ok(GateOutcome::Authenticated(AuthContext { identity, claims }))
    }
}

fn reject(reason: AuthError, path: &str, token_fp: Option<&str>) -> AppError {
    security::request_rejected(reason, path, token_fp);
    AppError::from(reason)
}

/// Parse `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::MissingCredentials)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AuthError::MissingCredentials),
    }
}
