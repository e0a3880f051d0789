use actix_web::{web, HttpResponse};

use crate::state::app_state::AppState;

/// Minimal Prometheus text exposition. Exempt from auth by default.
async fn metrics(app_state: web::Data<AppState>) -> HttpResponse {
    let mut body = format!(
        "# TYPE tokengate_build_info gauge\ntokengate_build_info{{version=\"{}\"}} 1\n",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(users) = app_state.user_count() {
        body.push_str(&format!(
            "# TYPE tokengate_users gauge\ntokengate_users {users}\n"
        ));
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics));
}
