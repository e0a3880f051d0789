use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error, HttpResponse};
use tokengate::{routes, AppState, AuthContext, RequestTrace, StructuredLogger, TraceSpan};

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Protected demo handler: echoes the authenticated subject.
async fn whoami(ctx: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "id": ctx.identity.id,
        "sub": ctx.subject(),
    }))
}

/// Public fixture page, exempt through the `/public/*` pattern.
async fn public_page() -> HttpResponse {
    HttpResponse::Ok().body("public")
}

/// Production routes plus the fixture routes the gate scenarios hit.
fn configure_test_routes(cfg: &mut web::ServiceConfig) {
    routes::configure(cfg);
    cfg.route("/some-path", web::get().to(whoami))
        .route("/public/{page}", web::get().to(public_page));
}

/// Builder for test services wired exactly like `main.rs`.
pub struct TestAppBuilder {
    state: AppState,
    route_config: RouteConfigFn,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: Box::new(configure_test_routes),
        }
    }

    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Box::new(config_fn);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let gate = self.state.auth_gate();
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(gate)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| route_config(cfg)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
