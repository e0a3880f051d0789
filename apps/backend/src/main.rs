use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tokengate::repos::InMemoryUserStore;
use tokengate::telemetry;
use tokengate::{routes, AppState, AuthSettings, RequestTrace, StructuredLogger, TraceSpan};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let settings = match AuthSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let store = match &settings.users_file {
        Some(path) => match InMemoryUserStore::load_json(path).await {
            Ok(store) => store,
            Err(e) => {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
        },
        None => InMemoryUserStore::new(),
    };

    let app_state = AppState::new(settings, Arc::new(store));
    tracing::info!(
        host = %host,
        port,
        users = app_state.user_count().unwrap_or(0),
        exempt_patterns = app_state.route_policy.pattern_count(),
        "tokengate_starting"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(data.auth_gate())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
